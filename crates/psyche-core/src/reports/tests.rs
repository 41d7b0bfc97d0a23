use super::*;
use chrono::Utc;
use psyche_calc::{classify_axes, compute_flow, Pole, RawPersonaAnswers};

/// Surface leans on Dominance and Affiliation; innate surplus sits in Care
/// and Value. Dominance is well satisfied by the environment, Affiliation
/// is not.
fn compensating() -> PersonaVectors {
    PersonaVectors {
        innate: DriveVector::from_array([1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 5.0]),
        surface: DriveVector::from_array([1.0, 1.0, 5.0, 1.0, 1.0, 5.0, 1.0]),
        imposed: DriveVector::from_array([3.0, 3.0, 4.0, 3.0, 3.0, 1.0, 3.0]),
    }
}

fn record(vectors: PersonaVectors) -> DerivationRecord {
    let neutral = RawPersonaAnswers::uniform(42, 3);
    DerivationRecord {
        user_id: "u1".into(),
        flow: compute_flow(&vectors),
        axes: classify_axes(&neutral, &neutral),
        vectors,
        fingerprint: "f".into(),
        computed_at: Utc::now(),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_drain_cards_follow_rank() {
    let flow = compute_flow(&compensating());
    let report = drain_report(&flow, &SignificanceThresholds::default());

    assert_eq!(report.cards[0].drive, Drive::Dominance);
    assert_eq!(report.cards[1].drive, Drive::Affiliation);
    assert!(report.cards.windows(2).all(|w| w[0].rank < w[1].rank));

    let dominance = &report.cards[0];
    assert!(close(dominance.transfer_total, 4.0));
    assert!(dominance.significantly_transferred);
    assert!(!dominance.significantly_drained);
    let sources: Vec<_> = dominance.transferred_from.iter().map(|s| s.source).collect();
    assert_eq!(sources, vec![Drive::Care, Drive::Value]);

    let affiliation = &report.cards[1];
    assert!(close(affiliation.drain_total, 8.0 / 3.0));
    assert_eq!(affiliation.drained_from.len(), 2);

    assert_eq!(report.drained, vec![Drive::Affiliation]);
    assert_eq!(report.transferred, vec![Drive::Dominance, Drive::Affiliation]);
}

#[test]
fn test_drain_card_outflow() {
    let flow = compute_flow(&compensating());
    let report = drain_report(&flow, &SignificanceThresholds::default());
    let care = report.cards.iter().find(|c| c.drive == Drive::Care).unwrap();
    assert!(close(care.outflow.drained, 4.0 / 3.0));
    assert!(close(care.outflow.transferred, 8.0 / 3.0));
    assert_eq!(care.drain_total, 0.0);
}

#[test]
fn test_thresholds_only_change_flags() {
    let flow = compute_flow(&compensating());
    let strict = SignificanceThresholds {
        drain: 3.0,
        transfer: 0.01,
    };
    let report = drain_report(&flow, &strict);
    assert!(report.drained.is_empty());
    let affiliation = report
        .cards
        .iter()
        .find(|c| c.drive == Drive::Affiliation)
        .unwrap();
    assert!(close(affiliation.drain_total, 8.0 / 3.0));
}

#[test]
fn test_jung_report_from_neutral_rows() {
    let rec = record(compensating());
    let report = jung_report(&rec.axes);
    assert_eq!(report.innate_type, "XXXX");
    assert_eq!(report.surface_type, "XXXX");
    assert_eq!(report.aligned_axes, 4);
    assert!(report.axes.iter().all(|a| a.innate.pole == Pole::Ambivalent));
}

#[test]
fn test_profession_fit_is_ranked() {
    let vectors = compensating();
    let flow = compute_flow(&vectors);
    let catalog = ProfessionCatalog::builtin().unwrap();
    let report = profession_fit_report(&vectors, &flow, &catalog);

    assert_eq!(report.job_match.len(), catalog.len());
    assert_eq!(report.aspired_match.len(), catalog.len());
    for ranking in [&report.job_match, &report.aspired_match] {
        assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(ranking.iter().all(|s| (0.0..=5.0).contains(&s.score)));
    }
    assert!(close(
        report.job_match_vector.get(Drive::Affiliation),
        5.0 - 8.0 / 3.0
    ));
    assert_eq!(report.aspired_match_vector.get(Drive::Care), 5.0);
}

#[test]
fn test_custom_job_with_zero_demand() {
    let vectors = compensating();
    let flow = compute_flow(&vectors);
    let fit = simulate_custom_job(&vectors, &flow, &DriveVector::zero());
    for b in [&fit.job_match, &fit.aspired_match] {
        assert!(b.score.is_finite());
        assert!((0.0..=5.0).contains(&b.score));
    }
}

#[test]
fn test_partner_profile_caps_care() {
    let profile = partner_profile(&compensating());

    assert_eq!(profile.raw_demand.get(Drive::Care), 5.0);
    let care = profile.cap_meta.get(Drive::Care).unwrap();
    assert!(care.is_capped);
    assert!(close(care.cap, 1.0));
    let binding: Vec<_> = care.components.iter().filter(|c| c.binding).collect();
    assert_eq!(binding.len(), 1);
    assert_eq!(binding[0].self_drive, Drive::Affiliation);
    assert!(close(profile.capped_demand.get(Drive::Care), 1.0));

    let value = profile.cap_meta.get(Drive::Value).unwrap();
    assert!(!value.is_capped);
    assert_eq!(profile.capped_demand.get(Drive::Value), 5.0);
}

#[test]
fn test_build_report_dispatch() {
    let rec = record(compensating());
    let catalog = ProfessionCatalog::builtin().unwrap();
    let thresholds = SignificanceThresholds::default();

    for kind in [
        ReportKind::Drain,
        ReportKind::Jung,
        ReportKind::Fit,
        ReportKind::Partner,
    ] {
        let report = build_report(kind, &rec, &thresholds, &catalog);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["report"], kind.as_str());
    }
}

#[test]
fn test_report_kind_parse() {
    assert_eq!("Drain".parse::<ReportKind>().unwrap(), ReportKind::Drain);
    assert_eq!("partner".parse::<ReportKind>().unwrap(), ReportKind::Partner);
    assert!("horoscope".parse::<ReportKind>().is_err());
}
