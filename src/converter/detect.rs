use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected when sniffing content
pub const SNIFF_SAMPLE_SIZE: usize = 8192;

/// Fraction of non-text bytes above which a sample counts as binary
pub const NON_TEXT_RATIO_LIMIT: f64 = 0.30;

/// Bytes considered text: BEL, BS, TAB, LF, FF, CR, ESC and 0x20..=0xFF except DEL
fn is_text_byte(byte: u8) -> bool {
    matches!(byte, 7 | 8 | 9 | 10 | 12 | 13 | 27) || (byte >= 0x20 && byte != 0x7f)
}

/// Classifies a byte sample as binary
///
/// An empty sample is text. Any NUL byte makes it binary, otherwise it is binary
/// when more than 30% of its bytes fall outside the text set.
pub fn looks_binary(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }

    let non_text = sample.iter().filter(|&&b| !is_text_byte(b)).count();
    non_text as f64 / sample.len() as f64 > NON_TEXT_RATIO_LIMIT
}

/// Reads up to the first 8 KiB of a file and classifies it
///
/// Errors are returned to the caller, which treats an unreadable file as binary.
pub fn sniff_file(path: &Path) -> io::Result<bool> {
    let file = File::open(path)?;
    let mut sample = Vec::with_capacity(SNIFF_SAMPLE_SIZE);
    file.take(SNIFF_SAMPLE_SIZE as u64).read_to_end(&mut sample)?;
    Ok(looks_binary(&sample))
}
