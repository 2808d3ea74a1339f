// FormatSelector - picks one stream URL out of a format map
//
// First match, not best match. Entries are scanned in page order and each
// entry is checked against the rules below; the first entry satisfying any
// rule wins:
//
//   prefer_hd               && code == 22  -> take it
//   (prefer_hd || prefer_mp4) && code == 18  -> take it
//   code == 5                              -> take it, whatever the flags
//
// Because format 5 is unconditional, a low-quality entry listed before an HD
// or MP4 entry wins even when the caller asked for HD. Page order decides.

use super::errors::ResolveError;
use super::models::{FormatEntry, QualityPreference, FORMAT_FLV_LOW, FORMAT_HD, FORMAT_MP4};

pub struct FormatSelector;

impl FormatSelector {
    /// URL of the first entry accepted under the given flags
    pub fn select(
        formats: &[FormatEntry],
        prefer_mp4: bool,
        prefer_hd: bool,
    ) -> Result<String, ResolveError> {
        Self::select_entry(formats, QualityPreference::new(prefer_mp4, prefer_hd))
            .map(|entry| entry.url.clone())
    }

    /// First accepted entry, for callers that also need its format code
    pub fn select_entry(
        formats: &[FormatEntry],
        preference: QualityPreference,
    ) -> Result<&FormatEntry, ResolveError> {
        formats
            .iter()
            .find(|entry| Self::accepts(entry.code, preference))
            .map(|entry| {
                tracing::debug!(
                    code = entry.code,
                    label = entry.label(),
                    url = %entry.url,
                    "Selected format"
                );
                entry
            })
            .ok_or(ResolveError::NoMatchingFormat {
                entries: formats.len(),
            })
    }

    fn accepts(code: i32, preference: QualityPreference) -> bool {
        (preference.prefer_hd && code == FORMAT_HD)
            || ((preference.prefer_hd || preference.prefer_mp4) && code == FORMAT_MP4)
            || code == FORMAT_FLV_LOW
    }
}
