//! End-to-end tests for the harmonic search.

use super::*;

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn violin() -> Instrument {
    Instrument::from_preset(Preset::Violin, DEFAULT_A4).unwrap()
}

/// Runs a search and returns `(string letter, base, half)` triples, with
/// stop lengths rounded to two places.
fn search(calculator: &HarmonicCalculator, name: &str, instrument: &Instrument) -> Vec<(char, f64, f64)> {
    let note = Note::from_name(name).unwrap();
    calculator
        .find_harmonics(&note, instrument)
        .unwrap()
        .iter()
        .map(|h| {
            let string = Note::from_frequency(h.string().frequency(), DEFAULT_A4, &[]).unwrap();
            (
                string.letter().as_char(),
                round2(h.base_stop().length()),
                round2(h.half_stop().length()),
            )
        })
        .collect()
}

#[test]
fn test_find_harmonics_a5_on_violin() {
    let got = search(&HarmonicCalculator::new(), "A5", &violin());
    assert_eq!(
        got,
        vec![
            ('A', 1.0, 0.5),   // 2nd harmonic
            ('D', 1.0, 0.33),  // 3rd harmonic
            ('D', 1.0, 0.67),  // 3rd harmonic
            ('D', 0.67, 0.33), // octave apart: A4 and A5
            ('G', 0.45, 0.22), // octave apart: A4 and A5
            ('G', 0.67, 0.45), // fifth apart: D4 and A4
            ('G', 0.89, 0.67), // fourth apart: A3 and D4
        ]
    );
}

#[test]
fn test_find_harmonics_g5_on_violin() {
    let got = search(&HarmonicCalculator::new(), "G5", &violin());
    assert_eq!(
        got,
        vec![
            ('G', 1.0, 0.25),  // 4th harmonic
            ('G', 1.0, 0.75),  // 4th harmonic
            ('G', 0.5, 0.25),  // octave apart: G4 and G5
            ('G', 0.75, 0.5),  // fifth apart: C4 and G4
        ]
    );
}

#[test]
fn test_find_harmonics_open_string() {
    let violin = violin();
    let note = Note::from_name("G3").unwrap();
    let harmonics = HarmonicCalculator::new().find_harmonics(&note, &violin).unwrap();
    assert_eq!(harmonics.len(), 1);
    let open = harmonics[0];
    assert_eq!(open.kind(), HarmonicKind::Open);
    assert!(std::ptr::eq(open.string(), &violin.strings()[3]));
    assert_eq!(open.number(), 1);
}

#[test]
fn test_sounding_frequencies_match_target() {
    let violin = violin();
    let note = Note::from_name("A5").unwrap();
    let target = note.frequency(DEFAULT_A4);
    let harmonics = HarmonicCalculator::new().find_harmonics(&note, &violin).unwrap();
    assert!(!harmonics.is_empty());
    for h in harmonics {
        let deviation = cents::between(target, h.sounding_frequency()).abs();
        assert!(deviation <= 50.0, "{h:?} deviates by {deviation} cents");
    }
}

#[test]
fn test_no_harmonics_found() {
    let violin = violin();
    let note = Note::from_name("C1").unwrap();
    let harmonics = HarmonicCalculator::new().find_harmonics(&note, &violin).unwrap();
    assert!(harmonics.is_empty());
}

#[test]
fn test_distance_constraints() {
    let violin = violin();

    // The D-string octave harmonic is about 108mm wide.
    let mut calculator = HarmonicCalculator::new();
    calculator.set_distance_constraints(1.0, 100.0);
    let got = search(&calculator, "A5", &violin);
    assert!(!got.contains(&('D', 0.67, 0.33)));
    assert!(got.contains(&('G', 0.45, 0.22)));

    // Natural harmonics are never limited by the stretch.
    calculator.set_distance_constraints(500.0, 600.0);
    let got = search(&calculator, "A5", &violin);
    assert_eq!(got, vec![('A', 1.0, 0.5), ('D', 1.0, 0.33), ('D', 1.0, 0.67)]);
}

#[test]
fn test_min_bowed_distance() {
    let violin = violin();
    let mut calculator = HarmonicCalculator::new();

    // 1/3 of 325mm is about 108mm from the bridge.
    calculator.set_min_bowed_distance(110.0);
    let got = search(&calculator, "A5", &violin);
    assert!(!got.contains(&('D', 1.0, 0.33)));
    assert!(got.contains(&('D', 1.0, 0.67)));
    assert!(got.iter().all(|&(_, _, half)| half * 325.0 >= 110.0 - 2.0));
}

#[test]
fn test_tolerance() {
    let violin = violin();
    let mut calculator = HarmonicCalculator::new();

    // The D string's 3rd harmonic is about 2 cents sharp of A5.
    calculator.set_tolerance(1.0);
    let got = search(&calculator, "A5", &violin);
    assert!(!got.contains(&('D', 1.0, 0.33)));
    assert!(got.contains(&('A', 1.0, 0.5)));
}

#[test]
fn test_natural_search_limit() {
    let guitar = Instrument::from_preset(Preset::Guitar, DEFAULT_A4).unwrap();
    let note = Note::from_name("E5").unwrap();

    // E5 is the 8th harmonic of the low E string.
    let calculator = HarmonicCalculator::new();
    let low_e = &guitar.strings()[5];
    let naturals: Vec<u32> = calculator
        .find_string_harmonics(&note, low_e)
        .unwrap()
        .iter()
        .filter(|h| h.is_natural())
        .map(|h| h.number())
        .collect();
    assert_eq!(naturals, vec![8, 8, 8, 8]);

    let mut limited = HarmonicCalculator::new();
    limited.set_max_natural_number(7);
    let naturals = limited
        .find_string_harmonics(&note, low_e)
        .unwrap()
        .iter()
        .filter(|h| h.is_natural())
        .count();
    assert_eq!(naturals, 0);
}

#[test]
fn test_search_limits_are_capped() {
    let mut calculator = HarmonicCalculator::new();
    calculator.set_max_natural_number(1000);
    calculator.set_max_artificial_number(1000);
    let violin = violin();
    let note = Note::from_name("E7").unwrap();
    let harmonics = calculator.find_harmonics(&note, &violin).unwrap();
    assert!(harmonics.iter().all(|h| h.number() <= MAX_HARMONIC_NUMBER));
}

#[test]
fn test_reference_frequency() {
    let baroque = Instrument::from_preset(Preset::Violin, 415.3).unwrap();
    let mut calculator = HarmonicCalculator::new();
    calculator.set_reference_frequency(415.3);
    let note = Note::from_name("A5").unwrap();
    let harmonics = calculator.find_harmonics(&note, &baroque).unwrap();
    let first = harmonics[0];
    assert!(first.is_natural());
    assert!((first.sounding_frequency() - 830.6).abs() < 0.01);
}

#[test]
fn test_constraints_default() {
    let c = Constraints::default();
    assert_eq!(c.min_stop_distance, 1.0);
    assert_eq!(c.max_stop_distance, 120.0);
    assert_eq!(c.min_bowed_distance, 20.0);
    assert_eq!(c.tolerance, 50.0);
    assert_eq!(c.max_natural_number, 8);
    assert_eq!(c.max_artificial_number, 6);
    assert_eq!(c.reference_frequency, 440.0);
}

#[test]
fn test_constraints_partial_deserialize() {
    let c: Constraints = serde_json::from_str(r#"{"tolerance": 10.0}"#).unwrap();
    assert_eq!(c.tolerance, 10.0);
    assert_eq!(c.max_stop_distance, 120.0);
}

#[test]
fn test_calculator_is_shareable() {
    fn assert_sync<T: Send + Sync>() {}
    assert_sync::<HarmonicCalculator>();
    assert_sync::<Instrument>();
}
