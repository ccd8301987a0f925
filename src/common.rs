const KB: usize = 1024;
const MB: usize = KB * 1024;
const GB: usize = MB * 1024;

/// Format a byte count in human-readable form, e.g. `"1.50 KB"`.
pub fn bytes2hr(bytes: usize) -> String {
    if bytes < KB {
        format!("{bytes} bytes")
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes2hr() {
        assert_eq!(bytes2hr(0), "0 bytes");
        assert_eq!(bytes2hr(1023), "1023 bytes");
        assert_eq!(bytes2hr(1536), "1.50 KB");
        assert_eq!(bytes2hr(3 * 1024 * 1024), "3.00 MB");
        assert_eq!(bytes2hr(5 * 1024 * 1024 * 1024), "5.00 GB");
    }
}
