use super::*;

#[test]
fn canvas_size_rejects_zero_dimensions() {
    assert!(CanvasSize::new(0, 4).is_err());
    assert!(CanvasSize::new(4, 0).is_err());
    let s = CanvasSize::new(4, 3).unwrap();
    assert_eq!(s.byte_len(4), Some(48));
}

#[test]
fn canvas_size_byte_len_reports_overflow() {
    let s = CanvasSize::new(u32::MAX, u32::MAX).unwrap();
    if usize::BITS <= 64 {
        assert_eq!(s.byte_len(4), None);
    }
}

