// Unit tests for Partner Match

use partner_match::core::{
    query::{BoundParam, PartnerQuery},
    ranking::{compare_ranked, rank},
    validation::{parse_location, parse_material_filter, parse_partner_id, parse_required_materials},
};
use partner_match::models::{Location, Material, MaterialSet, MatchedPartner, Partner};
use partner_match::MatchError;
use std::cmp::Ordering;

fn matched(id: i16, rating: f64, distance: f64) -> MatchedPartner {
    MatchedPartner {
        partner: Partner {
            id,
            name: format!("Partner {}", id),
            location: Location::new(0.0, 0.0),
            service_radius: 100.0,
            rating,
            materials: MaterialSet::from([Material::Wood]),
        },
        distance,
    }
}

#[test]
fn test_location_round_trip_of_example_address() {
    let location = parse_location("40.076763,113.30013").unwrap();
    assert_eq!(location.lat, 40.076763);
    assert_eq!(location.lng, 113.30013);
}

#[test]
fn test_location_accepts_exponent_and_sign() {
    assert_eq!(parse_location("+1e1,-2.5").unwrap(), Location::new(10.0, -2.5));
}

#[test]
fn test_material_parsing_order_does_not_matter() {
    assert_eq!(
        parse_required_materials("wood,tiles,carpet").unwrap(),
        parse_required_materials("carpet,tiles,wood").unwrap()
    );
}

#[test]
fn test_material_filter_vs_required() {
    assert!(parse_material_filter("").unwrap().is_empty());
    assert!(matches!(parse_required_materials(""), Err(MatchError::InvalidMaterial(_))));
}

#[test]
fn test_partner_id_bounds() {
    assert_eq!(parse_partner_id("32767").unwrap(), i16::MAX);
    assert_eq!(parse_partner_id("-32768").unwrap(), i16::MIN);
    assert!(matches!(parse_partner_id("32768"), Err(MatchError::MalformedId(_))));
}

#[test]
fn test_only_validated_materials_reach_sql() {
    let materials = parse_required_materials("tiles,carpet").unwrap();
    let query = PartnerQuery::Proximity {
        location: Location::new(52.0, 13.0),
        materials,
    };

    let sql = query.sql();
    assert!(sql.contains("ARRAY['carpet','tiles']::TEXT[]"));
    assert_eq!(query.params(), vec![BoundParam::Double(52.0), BoundParam::Double(13.0)]);
}

#[test]
fn test_compare_ranked() {
    assert_eq!(compare_ranked(&matched(1, 9.0, 8.0), &matched(2, 8.0, 1.0)), Ordering::Less);
    assert_eq!(compare_ranked(&matched(1, 8.0, 1.0), &matched(2, 8.0, 2.0)), Ordering::Less);
    assert_eq!(compare_ranked(&matched(1, 8.0, 2.0), &matched(2, 8.0, 2.0)), Ordering::Equal);
}

#[test]
fn test_rank_is_stable_for_full_ties() {
    let mut matches = vec![matched(3, 5.0, 1.0), matched(1, 5.0, 1.0), matched(2, 7.0, 4.0)];

    rank(&mut matches);

    let ids: Vec<i16> = matches.iter().map(|m| m.partner.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}
