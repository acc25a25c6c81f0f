use hypernum::{DisplayConfig, Hypernum, HypernumError, RawParts};
use num_traits::{ConstOne, ConstZero, ToPrimitive, Zero};

#[track_caller]
fn assert_close(actual: Hypernum, expected: impl Into<Hypernum>) {
    let expected = expected.into();
    assert_eq!(actual.pt(), expected.pt(), "{actual:?} vs {expected:?}");
    let (a, e) = (actual.plain_value(), expected.plain_value());
    assert!(((a - e) / e).abs() < 1e-10, "{actual:?} vs {expected:?}");
}

fn num(s: &str) -> Hypernum {
    s.parse().unwrap()
}

#[test]
fn test_norm() {
    assert_eq!(Hypernum::from_parts(0, 100.0, 0), Hypernum::from_parts(0, 1.0, 2));
    assert_eq!(Hypernum::from_parts(0, 0.0, 50), Hypernum::ZERO);
    assert_eq!(Hypernum::from_parts(0, 0.25, 0).expon(), -1);

    let promoted = Hypernum::from_parts(0, 1.0, 400);
    assert_eq!(promoted.pt(), 1);
    assert_eq!(promoted.mantissa(), 4.0);
    assert_eq!(promoted.expon(), 2);

    assert_eq!(Hypernum::from_parts(1, 2.0, 0), Hypernum::from(100));
    assert_eq!(Hypernum::from_parts(2, 5.0, 2).pt(), 2);
    assert_eq!(Hypernum::from_parts(2, 5.0, 0).pt(), 1);

    let negative = Hypernum::from_parts(0, -500.0, 0);
    assert!(negative.is_negative());
    assert_eq!(negative.expon(), 2);
    assert!((negative.mantissa() + 5.0).abs() < 1e-12);

    let nan = Hypernum::from_parts(3, f64::NAN, 7);
    assert!(nan.is_nan());
    assert_eq!((nan.pt(), nan.expon()), (0, 0));
    assert_eq!(Hypernum::from_parts(5, f64::NEG_INFINITY, 9), Hypernum::NEG_INFINITY);
}

#[test]
fn test_ops() {
    assert_eq!(Hypernum::from(5) + Hypernum::from(3), 8.0);
    assert_eq!(Hypernum::from(10) - Hypernum::from(10), Hypernum::ZERO);
    assert_eq!(Hypernum::from(2) * Hypernum::from(3), 6.0);
    assert_eq!(Hypernum::from(10) / Hypernum::from(2), 5.0);

    assert_eq!(Hypernum::ZERO - 1, -1.0);
    assert_eq!(1 - Hypernum::ZERO, 1.0);
    assert_eq!(-Hypernum::ONE - 1, -2.0);
    assert_eq!(Hypernum::ONE - -1, 2.0);
    assert_eq!(Hypernum::from(2) - 5, -3.0);
    assert_eq!(Hypernum::from(-2) * 3, -6.0);
    assert_eq!(Hypernum::from(-6) / -3, 2.0);
    assert_eq!(Hypernum::from(7) + 0, 7.0);
    assert_eq!(0 + Hypernum::from(7), 7.0);

    let mut acc = Hypernum::ONE;
    acc += 4;
    acc *= 2.5;
    acc -= Hypernum::from(2);
    acc /= 2;
    assert_close(acc, 5.25);

    assert_close(Hypernum::from(1e20) * Hypernum::from(1e20), 1e40);
    assert_close(Hypernum::from(1e300) * Hypernum::from(1e-300), 1.0);
}

#[test]
fn test_regimes() {
    let ten_e_400 = num("1e400");
    assert_eq!(ten_e_400.pt(), 1);

    assert_eq!(
        ten_e_400 + ten_e_400,
        Hypernum::from_parts(1, 400.0 + 2f64.log10(), 0)
    );
    assert_eq!(ten_e_400 + 5, ten_e_400);
    assert_eq!(ten_e_400 - ten_e_400, Hypernum::ZERO);
    assert_close(ten_e_400 * 2 / 2, ten_e_400);
    assert_close((ten_e_400 * ten_e_400).log10(), 800.0);
    assert_close(ten_e_400 / num("1e399"), 10.0);
    assert_close(num("1e399") / ten_e_400 * 10, 1.0);
    assert_eq!(Hypernum::from(1e300) * 1e10, num("1e310"));

    let huge = Hypernum::from_parts(2, 5.0, 2);
    assert_eq!(huge + ten_e_400, huge);
    assert_eq!(huge * 2, huge);
    assert_eq!(huge * -2, -huge);
    assert_eq!(-huge + 5, -huge);
    assert_eq!(5 - huge, -huge);
    assert_eq!(huge - 5, huge);
    assert_eq!(ten_e_400 / huge, Hypernum::ZERO);
    assert_eq!(huge / ten_e_400, huge);

    let nearby = Hypernum::from_parts(2, 4.9, 2);
    let combined = huge * nearby;
    assert_eq!(combined.pt(), 2);
    assert!(combined > huge);
    assert_eq!(huge.mul_with_tolerance(nearby, 5.0), huge);

    assert_eq!(huge / huge, Hypernum::ONE);
    assert_eq!(-huge / huge, -Hypernum::ONE);
    assert_eq!(huge / -huge, -Hypernum::ONE);
    assert_eq!(nearby / huge, Hypernum::ZERO);
    assert_eq!(huge / nearby, huge);
    assert_eq!(-huge / nearby, -huge);

    // Operators leave plain f64 at 1e300 while normalization keeps anything
    // below 1e301 at tower height zero.
    assert_eq!(Hypernum::from(5e300).pt(), 0);
    assert_eq!((Hypernum::from(5e150) * 1e150).pt(), 1);
    assert!(Hypernum::from(5e300) < Hypernum::from_parts(1, 300.5, 0));
}

#[test]
fn test_below_f64_range() {
    let tiny = num("1e-400");
    assert_eq!((tiny.pt(), tiny.mantissa(), tiny.expon()), (0, 1.0, -400));
    assert!(tiny > Hypernum::ZERO);
    assert!(-tiny < Hypernum::ZERO);

    assert_eq!(tiny * 1, tiny);
    assert_eq!(1 * tiny, tiny);
    assert_eq!(tiny / 1, tiny);
    assert_eq!(tiny / tiny, Hypernum::ONE);
    assert_eq!(num("1e-200") * num("1e-200"), tiny);
    assert_eq!(tiny * tiny, num("1e-800"));
    assert_eq!(Hypernum::ONE / tiny, num("1e400"));
    assert_eq!(-tiny * 3, -(tiny * 3));

    let doubled = tiny + tiny;
    assert_eq!(doubled.expon(), -400);
    assert!((doubled.mantissa() - 2.0).abs() < 1e-12);

    let difference = num("3e-400") - tiny;
    assert_eq!(difference.expon(), -400);
    assert!((difference.mantissa() - 2.0).abs() < 1e-12);
    let flipped = tiny - num("3e-400");
    assert!(flipped.is_negative());
    assert!((flipped.mantissa() + 2.0).abs() < 1e-12);

    assert_eq!(tiny - tiny, Hypernum::ZERO);
    assert_eq!(tiny + 1, Hypernum::ONE);
    assert_eq!(tiny.pow(2), Ok(num("1e-800")));
    assert_eq!(tiny.log10(), -400.0);
    assert_eq!(tiny.to_string(), "1 * 10^-400");
}

#[test]
fn test_sentinels() {
    assert_eq!(Hypernum::INFINITY + 5, Hypernum::INFINITY);
    assert_eq!(Hypernum::INFINITY + Hypernum::INFINITY, Hypernum::INFINITY);
    assert!((Hypernum::INFINITY - Hypernum::INFINITY).is_nan());
    assert!((Hypernum::INFINITY + Hypernum::NEG_INFINITY).is_nan());
    assert_eq!(Hypernum::INFINITY - Hypernum::NEG_INFINITY, Hypernum::INFINITY);
    assert_eq!(5 - Hypernum::INFINITY, Hypernum::NEG_INFINITY);

    assert!((Hypernum::ONE / Hypernum::ZERO).is_nan());
    assert!((Hypernum::INFINITY / Hypernum::INFINITY).is_nan());
    assert_eq!(Hypernum::NEG_INFINITY / 2, Hypernum::NEG_INFINITY);
    assert_eq!(Hypernum::from(5) / Hypernum::INFINITY, Hypernum::ZERO);

    assert_eq!(Hypernum::ZERO * Hypernum::INFINITY, Hypernum::ZERO);
    assert_eq!(Hypernum::INFINITY * -3, Hypernum::NEG_INFINITY);

    assert!((Hypernum::NAN + 1).is_nan());
    assert!((1i32 * Hypernum::NAN).is_nan());
    assert!(Hypernum::NAN.log10().is_nan());
    assert_eq!(Hypernum::ZERO.log10(), Hypernum::NEG_INFINITY);
}

#[test]
fn test_cmp() {
    let ascending = [
        Hypernum::NEG_INFINITY,
        num("-1e400"),
        Hypernum::from(-5),
        Hypernum::from(-1e-5),
        Hypernum::ZERO,
        Hypernum::from(1e-5),
        Hypernum::from(5),
        Hypernum::OVERFLOW,
        num("1e400"),
        Hypernum::from_parts(2, 5.0, 2),
        Hypernum::from_parts(7, 5.0, 2),
        Hypernum::INFINITY,
    ];
    for (i, a) in ascending.iter().enumerate() {
        for (j, b) in ascending.iter().enumerate() {
            assert_eq!(a < b, i < j, "{a:?} < {b:?}");
            assert_eq!(a == b, i == j, "{a:?} == {b:?}");
        }
    }

    let nan = Hypernum::NAN;
    assert_ne!(nan, nan);
    assert!(!(nan < Hypernum::ONE) && !(nan > Hypernum::ONE));
    assert!(!nan.greater_than(&Hypernum::ZERO));
    assert_eq!(nan.partial_cmp(&nan), None);

    assert!(Hypernum::from(3) > 2.5);
    assert_eq!(Hypernum::from(3).max(Hypernum::from(4)), 4.0);
    assert_eq!(Hypernum::from(-3).min(Hypernum::from(4)), -3.0);
}

#[test]
fn test_transcendental() {
    assert_eq!(num("1e400").log10(), 400.0);
    assert_eq!(Hypernum::from(10).log10(), 1.0);
    assert_close(Hypernum::E.ln(), 1.0);
    assert_close(Hypernum::from(8).log(2), 3.0);
    assert_close(num("1e400").ln(), 400.0 * std::f64::consts::LN_10);

    let googol = num("1e100");
    let googolplex = googol.pow10();
    assert_eq!(googolplex.pt(), 1);
    assert_eq!(googolplex.log10(), googol);
    assert_eq!(googolplex.pow10().pt(), 2);
    assert_eq!(Hypernum::from(-400).pow10(), num("1e-400"));
    assert_eq!(num("-1e400").pow10(), Hypernum::ZERO);

    assert_eq!(Hypernum::ZERO.exp(), Hypernum::ONE);
    assert_close(Hypernum::from(2).exp(), std::f64::consts::E * std::f64::consts::E);
    let e_1000 = Hypernum::from(1000).exp();
    assert_eq!(e_1000.pt(), 1);
    assert_close(e_1000.log10(), 434.29448190325184);
    assert_close(Hypernum::from(1000).exp().ln(), 1000.0);
    let e_minus_1000 = Hypernum::from(-1000).exp();
    assert_eq!((e_minus_1000.pt(), e_minus_1000.expon()), (0, -435));
    assert_close(e_minus_1000.ln(), -1000.0);
}

#[test]
fn test_pow() {
    assert_eq!(Hypernum::from(10).pow(2), Ok(Hypernum::from(100)));
    assert_eq!(Hypernum::from(-2).pow(2), Ok(Hypernum::from(4)));
    assert_eq!(Hypernum::from(-2).pow(3), Ok(Hypernum::from(-8)));
    assert_close(Hypernum::from(1.5).pow(64).unwrap(), 1.5f64.powi(64));
    assert_close(Hypernum::from(-2).pow(65).unwrap(), -(2f64.powi(65)));
    assert!(Hypernum::from(-4).pow(0.5).unwrap().is_positive());
    assert_eq!(Hypernum::from(2).pow(0), Ok(Hypernum::ONE));
    assert_eq!(Hypernum::ZERO.pow(3), Ok(Hypernum::ZERO));
    assert_eq!(Hypernum::from(7).pow(1), Ok(Hypernum::from(7)));
    assert!(matches!(
        Hypernum::from(2).pow(-1),
        Err(HypernumError::UnsupportedOperation(_))
    ));
    assert_eq!(Hypernum::from(10).pow(1000).unwrap(), num("1e1000"));

    assert!(Hypernum::from(2).pow(Hypernum::INFINITY).unwrap().is_nan());
    assert_eq!(Hypernum::from(2).pow(Hypernum::NEG_INFINITY), Ok(Hypernum::ZERO));
    assert_eq!(Hypernum::ZERO.pow(0), Ok(Hypernum::ONE));
    assert!(Hypernum::NAN.pow(2).unwrap().is_nan());
    assert!(Hypernum::from(2).pow(Hypernum::NAN).unwrap().is_nan());
    assert!(Hypernum::NEG_INFINITY.pow(2).unwrap().is_nan());
    assert_eq!(Hypernum::INFINITY.pow(2), Ok(Hypernum::INFINITY));

    assert_close(Hypernum::from(16).sqrt(), 4.0);
    assert_eq!(num("1e1000").sqrt(), num("1e500"));
}

#[test]
fn test_gamma() {
    assert_eq!(Hypernum::from(5).factorial(), 120.0);
    assert_eq!(Hypernum::ZERO.factorial(), Hypernum::ONE);
    assert_eq!(Hypernum::from(10).factorial(), 3628800.0);
    assert_close(Hypernum::from(2.5).factorial(), 3.323350970447842);
    assert_close(Hypernum::from(6).gamma(), 120.0);
    assert_close(Hypernum::from(30).gamma(), 8.841761993739703e30);
    assert_close(Hypernum::from(0.5).gamma(), std::f64::consts::PI.sqrt());
    assert!(Hypernum::from(-3).gamma().is_infinite());

    let big = Hypernum::from(1e10).factorial();
    assert_eq!(big.pt(), 1);
    assert_close(big.log10(), 95657055186.36656);

    assert!(num("1e400").factorial().pt() >= 2);
    assert_eq!(Hypernum::INFINITY.gamma(), Hypernum::INFINITY);
}

#[test]
fn test_lambert_w() {
    assert_close(Hypernum::ONE.lambert_w().unwrap(), 0.5671432904097838);
    assert_eq!(Hypernum::ZERO.lambert_w(), Ok(Hypernum::ZERO));
    assert!(matches!(
        Hypernum::from(-1).lambert_w(),
        Err(HypernumError::ConvergenceFailure { .. })
    ));

    let w = Hypernum::from_parts(1, 1.0, 100).lambert_w().unwrap();
    assert_eq!(w.pt(), 0);
    assert!(w > 2e100 && w < 2.31e100);
}

#[test]
fn test_iteration() {
    assert_eq!(Hypernum::from(2).iterpow(10), Ok(Hypernum::from(1024)));
    assert_eq!(Hypernum::from(2).iterpow(0), Ok(Hypernum::ONE));
    assert_eq!(Hypernum::ONE.iterpow(1e15), Ok(Hypernum::ONE));
    assert_eq!(
        Hypernum::from(2).iterpow(num("1e400")),
        Err(HypernumError::PowerTooLarge("power"))
    );

    assert_eq!(Hypernum::from(2).itertetra(3), Ok(Hypernum::from(16)));
    assert_eq!(Hypernum::from(2).itertetra(3.9), Ok(Hypernum::from(16)));
    assert_eq!(Hypernum::from(2).itertetra(4), Ok(Hypernum::from(65536)));
    assert_close(Hypernum::from(2).itertetra(5).unwrap().log10(), 19728.30179583467);
    assert_eq!(Hypernum::from(2).itertetra(1), Ok(Hypernum::from(2)));
    assert_eq!(Hypernum::from(10).itertetra(4).unwrap().pt(), 2);
    assert_eq!(
        Hypernum::from(2).itertetra(1e20),
        Err(HypernumError::PowerTooLarge("tetration"))
    );
}

#[test]
fn test_tower_shift() {
    let mut x = Hypernum::from(5);
    x.shift_tower(1).unwrap();
    assert_eq!(x, 100000.0);

    assert!(matches!(x.shift_tower(-2), Err(HypernumError::InvalidArgument(_))));
    assert_eq!(x, 100000.0);

    x >>= 1;
    assert_eq!(x.pt(), 1);
    assert_eq!(x.plain_value(), 100000.0);

    x.decrement_tower(1).unwrap();
    assert_eq!(x, 100000.0);
    assert!(x.decrement_tower(1).is_err());
}

#[test]
fn test_parse() {
    assert_eq!(num("123.45"), 123.45);
    assert_eq!(num("+7"), 7.0);
    assert_eq!(num("5."), 5.0);
    assert_eq!(num("1⏨5"), 100000.0);
    assert_eq!(num("1E3"), 1000.0);

    let small = num("-2.5E-3");
    assert_eq!((small.mantissa(), small.expon()), (-2.5, -3));

    assert_eq!(num("2p3"), Hypernum::from_parts(2, 3.0, 0));
    assert_eq!(num("3P1.5").pt(), 1);
    assert_eq!(num("1p-4e2"), -num("1e400"));

    let long = format!("1{}", "0".repeat(400));
    assert_eq!(num(&long), num("1e400"));

    assert!(num("NaN").is_nan());
    assert_eq!(num("Inf"), Hypernum::INFINITY);
    assert_eq!(num("-Inf"), Hypernum::NEG_INFINITY);

    use hypernum::FromStrError::MalformedInput;
    for (input, index) in [
        ("", 0),
        ("abc", 0),
        ("1e", 2),
        ("1.2.3", 3),
        ("--1", 1),
        ("p5", 0),
        ("Infinity", 3),
        ("12 ", 2),
    ] {
        assert_eq!(
            input.parse::<Hypernum>(),
            Err(HypernumError::Format(MalformedInput(index))),
            "{input:?}"
        );
    }
}

#[test]
fn test_display() {
    assert_eq!(Hypernum::from(5).to_string(), "5");
    assert_eq!(Hypernum::from(-2.5).to_string(), "-2.5");
    assert_eq!(Hypernum::from(1e20).to_string(), "1 * 10^20");
    assert_eq!(num("1e400").to_string(), "1 * 10^400");
    assert_eq!(num("1e100").pow10().to_string(), "10^(1 * 10^100)");
    assert_eq!(Hypernum::from_parts(7, 5.0, 2).to_string(), "7 PT 5.000000e2");
    assert_eq!(Hypernum::NAN.to_string(), "NaN");
    assert_eq!(Hypernum::INFINITY.to_string(), "Inf");
    assert_eq!(Hypernum::NEG_INFINITY.to_string(), "-Inf");

    let tight = DisplayConfig { str_pt_limit: 1, ..DisplayConfig::default() };
    assert_eq!(num("1e100").pow10().to_string_with(&tight), "1 PT 1.000000e100");

    assert_eq!(Hypernum::from(5).to_latex(), "$5$");
    assert_eq!(num("1e400").to_latex(), "$1\\times 10^{400}$");
    assert_eq!(num("1e100").pow10().to_latex(), "$10^{1\\times 10^{100}}$");
    assert_eq!(
        Hypernum::from_parts(3, 5.0, 2).to_latex(),
        "$3 {\\rm \\ PT\\ } 5\\times 10^{2}$"
    );
    assert_eq!(Hypernum::NEG_INFINITY.to_latex(), "$-\\infty$");
    assert_eq!(Hypernum::NAN.to_latex(), "$\\rm NaN$");

    for value in [123.456, -0.5, 42.0, 1e-7, 99999.0] {
        let x = Hypernum::from(value);
        assert_close(num(&x.to_string()), value);
    }
}

#[test]
fn test_tower_notation() {
    assert_eq!(Hypernum::from(5).to_tower_notation(), "5e0");
    assert_eq!(num("1e400").to_tower_notation(), "1p4e2");
    assert_eq!(Hypernum::NEG_INFINITY.to_tower_notation(), "-Inf");

    for x in [
        Hypernum::from(1.2345678901234567),
        Hypernum::from(-3e-200),
        num("-1e400"),
        Hypernum::from_parts(2, 5.0, 2),
        Hypernum::from_parts(9, 7.25, 299),
        Hypernum::INFINITY,
    ] {
        assert_eq!(num(&x.to_tower_notation()), x);
    }
}

#[test]
fn test_num_traits() {
    assert!(Hypernum::zero().is_zero());
    assert_eq!(Hypernum::from(42).to_i64(), Some(42));
    assert_eq!(Hypernum::from(-1).to_u64(), None);
    assert_eq!(num("1e400").to_f64(), f64::INFINITY);
    assert_eq!(f64::from(Hypernum::from(2.5)), 2.5);
    assert_eq!(Hypernum::from(-7).signum(), -1.0);
    assert_eq!(Hypernum::from(-7).sign(), -1);
    assert!(num("1e400").is_integer());
    assert!(!Hypernum::from(2.5).is_integer());
}

#[test]
fn test_raw_parts() {
    let parts = RawParts { pt: Some(1), mantissa: Some(2.0), exp: Some(0) };
    assert_eq!(Hypernum::try_from(parts), Ok(Hypernum::from(100)));
    assert_eq!(num("1e400").to_parts(), RawParts { pt: Some(1), mantissa: Some(4.0), exp: Some(2) });

    let negative = RawParts { pt: Some(-1), ..parts };
    assert!(matches!(Hypernum::try_from(negative), Err(HypernumError::InvalidArgument(_))));
    let missing = RawParts { mantissa: None, ..parts };
    assert!(matches!(Hypernum::try_from(missing), Err(HypernumError::InvalidArgument(_))));
}

#[cfg(feature = "serde")]
#[test]
fn test_serde() {
    let json = serde_json::to_string(&Hypernum::from(5)).unwrap();
    assert_eq!(json, r#"{"pt":0,"mantissa":5.0,"exp":0}"#);
    assert_eq!(serde_json::from_str::<Hypernum>(&json).unwrap(), Hypernum::from(5));

    let tower = Hypernum::from_parts(2, 5.0, 2);
    let json = serde_json::to_string(&tower).unwrap();
    assert_eq!(serde_json::from_str::<Hypernum>(&json).unwrap(), tower);

    assert!(serde_json::from_str::<Hypernum>(r#"{"pt":0,"mantissa":5.0}"#).is_err());
    assert!(serde_json::from_str::<Hypernum>(r#"{"pt":-2,"mantissa":5.0,"exp":0}"#).is_err());
    assert_eq!(
        serde_json::from_str::<Hypernum>(r#"{"pt":0,"mantissa":250.0,"exp":0}"#).unwrap(),
        Hypernum::from(250)
    );

    let config: DisplayConfig = serde_json::from_str(r#"{"str_pt_limit":4}"#).unwrap();
    assert_eq!(config, DisplayConfig { str_pt_limit: 4, ..DisplayConfig::default() });
}
