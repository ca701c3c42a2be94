use super::*;

#[test]
fn parse_six_digit_hex() {
    let c = parse_color("#6e3466").unwrap();
    assert_eq!(c, Color::from_rgba(0x6e, 0x34, 0x66, 255));
}

#[test]
fn parse_short_hex_expands() {
    let c = parse_color("#0af").unwrap();
    assert_eq!(c, Color::from_rgba(0x00, 0xaa, 0xff, 255));
}

#[test]
fn parse_eight_digit_hex() {
    let c = parse_color("#0133ff80").unwrap();
    assert_eq!(c.a, 0x80);
}

#[test]
fn parse_rgba_float_alpha() {
    let c = parse_color("rgba(0, 212, 255, 0.5)").unwrap();
    assert_eq!(c, Color::from_rgba(0, 212, 255, 128));
}

#[test]
fn parse_rgba_integer_alpha() {
    let c = parse_color("rgba(10,20,30,200)").unwrap();
    assert_eq!(c.a, 200);
}

#[test]
fn parse_rgb_without_alpha_is_opaque() {
    let c = parse_color("rgb(1,2,3)").unwrap();
    assert_eq!(c, Color::from_rgba(1, 2, 3, 255));
}

#[test]
fn parse_rejects_bad_input() {
    assert!(parse_color("#12345").is_err());
    assert!(parse_color("#zzzzzz").is_err());
    assert!(parse_color("rgba(300,0,0,1.0)").is_err());
    assert!(parse_color("rgba(0,0,0,1.5)").is_err());
    assert!(parse_color("teal").is_err());
}

#[test]
fn validate_color_matches_parse() {
    assert!(validate_color("#b8fff7"));
    assert!(validate_color("  #abc "));
    assert!(validate_color("rgba(1,2,3,0.4)"));
    assert!(!validate_color(""));
    assert!(!validate_color("#abcd"));
    assert!(!validate_color("blue"));
}
