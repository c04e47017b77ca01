use std::time::Instant;

/// Run `f` and return its result with the wall time in milliseconds
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, f32) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f32() * 1000.0)
}

/// `12.34 ms`, or `N/A` when nothing was measured yet
pub fn format_ms(ms: Option<f32>) -> String {
    match ms {
        Some(ms) => format!("{ms:.2} ms"),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_measure_returns_result_and_elapsed() {
        let (value, ms) = measure(|| {
            std::thread::sleep(Duration::from_millis(5));
            42
        });
        assert_eq!(value, 42);
        assert!(ms >= 4.0, "elapsed {ms}");
    }

    #[test]
    fn test_format_ms() {
        assert_eq!(format_ms(None), "N/A");
        assert_eq!(format_ms(Some(1.234)), "1.23 ms");
        assert_eq!(format_ms(Some(0.0)), "0.00 ms");
    }
}
