/// RIFF INFO adapter
///
/// INFO chunks only carry the generic fields. The creation date `ICRD` is
/// kept as text, the track number is an integer without total.
use super::common::{export_common_fields, import_common_fields};
use super::WriteOptions;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use lofty::iff::wav::RIFFInfoList;
use soul_core::TrackMetadata;

const CREATION_DATE: &str = "ICRD";

/// Read a RIFF INFO chunk into `metadata`
pub fn import_track_metadata_from_riff_info_tag(
    metadata: &mut TrackMetadata,
    tag: &RIFFInfoList,
    _diagnostics: &mut Diagnostics,
) {
    import_common_fields(tag, metadata);

    if let Some(date) = tag.get(CREATION_DATE) {
        metadata.year = Some(date.to_string());
    }
}

/// Write `metadata` into a RIFF INFO chunk
pub fn export_track_metadata_into_riff_info_tag(
    tag: &mut RIFFInfoList,
    metadata: &TrackMetadata,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    export_common_fields(tag, metadata, WriteOptions::OMIT_YEAR, diagnostics);
    match metadata.year.as_deref().filter(|year| !year.is_empty()) {
        Some(year) => tag.insert(CREATION_DATE.to_string(), year.to_string()),
        None => {
            let _ = tag.remove(CREATION_DATE);
        }
    }
    Ok(())
}
