use aerodesk::export::text_metrics::{encode_winansi, text_width, wrap_text};

#[test]
fn test_wrap_greedy_fills_lines() {
    // "aaaa aaaa" ≈ 47.3pt at 10pt Helvetica, the third word does not fit in 50pt
    let lines = wrap_text("aaaa aaaa aaaa", 10.0, 50.0);
    assert_eq!(lines, vec!["aaaa aaaa", "aaaa"]);
}

#[test]
fn test_wrap_everything_fits() {
    let lines = wrap_text("Fretamento SBSP-SBRJ", 10.0, 500.0);
    assert_eq!(lines, vec!["Fretamento SBSP-SBRJ"]);
}

#[test]
fn test_wrap_blank_text_is_empty() {
    assert!(wrap_text("", 10.0, 100.0).is_empty());
    assert!(wrap_text("   ", 10.0, 100.0).is_empty());
}

#[test]
fn test_wrap_keeps_long_word_whole() {
    let lines = wrap_text("a supercalifragilistic b", 10.0, 30.0);
    assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
}

#[test]
fn test_wrap_respects_paragraphs() {
    let lines = wrap_text("first\nsecond", 10.0, 500.0);
    assert_eq!(lines, vec!["first", "second"]);
}

#[test]
fn test_every_wrapped_line_fits() {
    let text = "Recebemos a importância referente ao rateio de horas de voo da aeronave \
                PR-ABC no mês de março, conforme diário de bordo.";
    for line in wrap_text(text, 9.0, 150.0) {
        assert!(text_width(&line, 9.0) <= 150.0, "line too wide: {line}");
    }
}

#[test]
fn test_text_width_scales_with_size() {
    let w10 = text_width("Recibo", 10.0);
    let w20 = text_width("Recibo", 20.0);
    assert!((w20 - 2.0 * w10).abs() < 0.001);
}

#[test]
fn test_winansi_encoding() {
    assert_eq!(encode_winansi("São"), vec![b'S', 0xE3, b'o']);
    assert_eq!(encode_winansi("R$ 1–2"), vec![b'R', b'$', b' ', b'1', 0x96, b'2']);
    assert_eq!(encode_winansi("✈"), vec![b'?']);
}
