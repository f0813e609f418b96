use chunked_text::sans::{
    Budget, Matcher, Plan, Search, Step, Transcoder,
    marker::{self, MarkerError},
    transcode::{self, TEXT_CAPACITY, Text},
};
use encoding_rs::{
    BIG5, EUC_JP, GB18030, ISO_2022_JP, SHIFT_JIS, UTF_8, UTF_16BE, WINDOWS_1252,
};
use rstest::rstest;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn drain(text: &mut Text) -> String {
    let mut out = String::new();
    while let Some(c) = text.pop() {
        out.push(c);
    }
    out
}

#[rstest]
#[case(0, 10, 1, Plan::Direct)]
#[case(0, 100, 1, Plan::Prefix(100))]
#[case(0, 3, 4, Plan::Direct)]
#[case(0, 64, 4, Plan::Prefix(25))]
#[case(95, 64, 4, Plan::Prefix(1))]
#[case(97, 64, 4, Plan::Scan)]
#[case(100, 1, 1, Plan::Scan)]
#[case(250, 1, 1, Plan::Scan)]
fn plan_requests(
    #[case] position: u64,
    #[case] requested: usize,
    #[case] max_bytes_per_char: usize,
    #[case] expected: Plan,
) {
    assert_eq!(
        Budget::new(100).plan(position, requested, max_bytes_per_char),
        expected
    );
}

#[test]
fn budget_bookkeeping() {
    let budget = Budget::new(10);

    assert_eq!(budget.bytes(), 10);
    assert_eq!(budget.remaining(4), 6);
    assert_eq!(budget.remaining(12), 0);
    assert!(!budget.is_exceeded(10));
    assert!(budget.is_exceeded(11));
}

fn first_match(search: Search, marker: &str, text: &str) -> Option<usize> {
    let marker = chars(marker);
    let mut matcher = Matcher::new(search);

    text.chars().position(|c| matcher.advance(&marker, c))
}

#[rstest]
#[case("\r\n", "x\r\r\nab\r\n", Some(3), Some(7))]
#[case("aab", "aaab", Some(3), None)]
#[case("abab", "abababab", Some(3), Some(3))]
#[case("abac", "ababac", Some(5), None)]
#[case("\n", "ab\n", Some(2), Some(2))]
#[case("xyz", "xyxy", None, None)]
fn matching(
    #[case] marker: &str,
    #[case] text: &str,
    #[case] exact: Option<usize>,
    #[case] restart: Option<usize>,
) {
    assert_eq!(first_match(Search::Exact, marker, text), exact);
    assert_eq!(first_match(Search::Restart, marker, text), restart);
}

#[test]
fn matcher_resets_after_match() {
    let marker = chars("ab");
    let mut matcher = Matcher::new(Search::Exact);

    let ends: Vec<usize> = "abab"
        .chars()
        .enumerate()
        .filter_map(|(i, c)| matcher.advance(&marker, c).then_some(i))
        .collect();

    assert_eq!(ends, [1, 3]);
    assert_eq!(matcher.matched(), 0);
    assert_eq!(matcher.search(), Search::Exact);
}

#[test]
fn empty_marker_is_invalid() {
    assert!(matches!(marker::validate(&[]), Err(MarkerError::Empty)));
    assert!(marker::validate(&['\n']).is_ok());
}

#[test]
fn character_split_between_steps() {
    let mut transcoder = Transcoder::new(UTF_8);
    let mut text = Text::new();

    assert_eq!(
        transcoder.decode(b"\xc3", &mut text, false).unwrap(),
        Step::Underflow { read: 1 }
    );
    assert!(text.is_empty());

    assert_eq!(
        transcoder.decode(b"\xa9", &mut text, false).unwrap(),
        Step::Underflow { read: 1 }
    );
    assert_eq!(drain(&mut text), "é");
}

#[test]
fn malformed_byte_is_replaced() {
    let mut transcoder = Transcoder::new(UTF_8);
    let mut text = Text::new();

    let step = transcoder.decode(b"\xffa", &mut text, false).unwrap();
    assert_eq!(step, Step::Malformed { read: 1 });
    assert_eq!(step.read(), 1);
    assert_eq!(drain(&mut text), "\u{FFFD}");

    let step = transcoder.decode(b"a", &mut text, false).unwrap();
    assert_eq!(step, Step::Underflow { read: 1 });
    assert_eq!(drain(&mut text), "a");
}

#[test]
fn full_window_overflows() {
    let mut transcoder = Transcoder::new(WINDOWS_1252);
    let mut text = Text::new();
    let src = [b'z'; 2 * TEXT_CAPACITY];

    let step = transcoder.decode(&src, &mut text, false).unwrap();

    assert!(matches!(step, Step::Overflow { read } if read > 0 && read < src.len()));
    assert_eq!(text.len(), step.read());
}

#[test]
fn flushed_exactly_once() {
    let mut transcoder = Transcoder::new(UTF_8);
    let mut text = Text::new();

    assert!(!transcoder.is_flushed());
    transcoder.decode(b"\xe2\x82", &mut text, false).unwrap();

    let step = transcoder.decode(b"", &mut text, true).unwrap();
    assert_eq!(step, Step::Malformed { read: 0 });
    assert_eq!(drain(&mut text), "\u{FFFD}");
    assert!(!transcoder.is_flushed());

    let step = transcoder.decode(b"", &mut text, true).unwrap();
    assert_eq!(step, Step::Underflow { read: 0 });
    assert!(transcoder.is_flushed());

    let step = transcoder.decode(b"more", &mut text, true).unwrap();
    assert_eq!(step, Step::Underflow { read: 0 });
    assert!(text.is_empty());
}

#[test]
fn byte_order_mark_removed() {
    let mut transcoder = Transcoder::new(UTF_16BE);
    let mut text = Text::new();

    transcoder.decode(b"\xfe\xff\x00h\x00i", &mut text, true).unwrap();
    assert_eq!(drain(&mut text), "hi");
    assert_eq!(transcoder.encoding(), UTF_16BE);
}

#[test]
fn text_window_take() {
    let mut transcoder = Transcoder::new(UTF_8);
    let mut text = Text::default();

    transcoder.decode(b"abcde", &mut text, false).unwrap();

    let mut dst = ['\0'; 3];
    assert_eq!(text.take_into(&mut dst), 3);
    assert_eq!(dst, ['a', 'b', 'c']);
    assert_eq!(text.len(), 2);

    text.clear();
    assert!(text.is_empty());
    assert_eq!(text.pop(), None);
}

#[rstest]
#[case(WINDOWS_1252, 1)]
#[case(UTF_8, 4)]
#[case(UTF_16BE, 4)]
#[case(GB18030, 4)]
#[case(EUC_JP, 3)]
#[case(SHIFT_JIS, 2)]
#[case(BIG5, 2)]
#[case(ISO_2022_JP, 8)]
fn widest_characters(#[case] encoding: &'static encoding_rs::Encoding, #[case] max: usize) {
    assert_eq!(transcode::max_bytes_per_char(encoding), max);
    assert_eq!(Transcoder::new(encoding).max_bytes_per_char(), max);
}
