//! Filtered deal queries: organization scoping, exact status match and
//! calendar-year overlap, composed with AND.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use rusqlite::Connection;
use std::collections::BTreeSet;

struct Fixture {
    conn: Connection,
    org_id: i64,
    other_org_id: i64,
    /// closed-won, whole of 2023
    full_2023: Deal,
    /// negotiation, 2023-06-01 .. 2024-05-31
    spanning: Deal,
    /// proposal, 2023-03-01 .. 2025-02-01
    multi_year: Deal,
    /// closed-won, single day in 2022
    single_day_2022: Deal,
}

fn fixture() -> Fixture {
    let conn = setup_test_db();
    let org = create_test_org(&conn, "Acme");
    let other = create_test_org(&conn, "Globex");
    let sales = create_test_account(&conn, org.id, "Acme Sales");
    let marketing = create_test_account(&conn, org.id, "Acme Marketing");
    let globex = create_test_account(&conn, other.id, "Globex Research");

    let full_2023 = create_test_deal(&conn, &sales, "2023-01-01", "2023-12-31", 50000.0, "closed-won");
    let spanning = create_test_deal(&conn, &sales, "2023-06-01", "2024-05-31", 75000.0, "negotiation");
    let multi_year = create_test_deal(&conn, &marketing, "2023-03-01", "2025-02-01", 120000.0, "proposal");
    let single_day_2022 = create_test_deal(&conn, &marketing, "2022-07-04", "2022-07-04", 900.0, "closed-won");

    // Same statuses and years in another organization must never leak in
    create_test_deal(&conn, &globex, "2023-01-01", "2024-12-31", 1.0, "closed-won");
    create_test_deal(&conn, &globex, "2022-01-01", "2022-12-31", 2.0, "negotiation");

    Fixture {
        conn,
        org_id: org.id,
        other_org_id: other.id,
        full_2023,
        spanning,
        multi_year,
        single_day_2022,
    }
}

impl Fixture {
    fn all(&self) -> Vec<Deal> {
        vec![
            self.full_2023.clone(),
            self.spanning.clone(),
            self.multi_year.clone(),
            self.single_day_2022.clone(),
        ]
    }

    fn run(&self, filter: DealFilter) -> BTreeSet<i64> {
        let deals = queries::list_deals_filtered(&self.conn, &filter).expect("Query failed");
        deal_ids(&deals)
    }
}

fn ids(deals: &[&Deal]) -> BTreeSet<i64> {
    deals.iter().map(|d| d.id).collect()
}

#[test]
fn test_no_filters_returns_every_deal_of_the_organization() {
    let f = fixture();
    let found = f.run(DealFilter::for_organization(f.org_id));
    assert_eq!(found, deal_ids(&f.all()));
}

#[test]
fn test_results_are_scoped_to_the_organization() {
    let f = fixture();
    let deals = queries::list_deals_filtered(&f.conn, &DealFilter::for_organization(f.other_org_id))
        .unwrap();
    assert_eq!(deals.len(), 2);
    assert!(deals.iter().all(|d| d.organization_id == f.other_org_id));
}

#[test]
fn test_unknown_organization_yields_empty_result() {
    let f = fixture();
    let deals = queries::list_deals_filtered(&f.conn, &DealFilter::for_organization(999))
        .expect("unknown organization must not be an error");
    assert!(deals.is_empty());
}

#[test]
fn test_organization_without_deals_yields_empty_result() {
    let f = fixture();
    let empty = create_test_org(&f.conn, "Initech");
    let deals = queries::list_deals_filtered(&f.conn, &DealFilter::for_organization(empty.id))
        .unwrap();
    assert!(deals.is_empty());
}

#[test]
fn test_status_filter_includes_own_status_and_excludes_others() {
    let f = fixture();
    for deal in f.all() {
        let found = f.run(DealFilter::for_organization(f.org_id).status(deal.status.clone()));
        assert!(
            found.contains(&deal.id),
            "deal {} should match its own status {}",
            deal.id,
            deal.status
        );

        for other in DEAL_STATUSES.iter().filter(|s| **s != deal.status) {
            let found = f.run(DealFilter::for_organization(f.org_id).status(*other));
            assert!(
                !found.contains(&deal.id),
                "deal {} ({}) should not match status {}",
                deal.id,
                deal.status,
                other
            );
        }
    }
}

#[test]
fn test_status_match_is_case_sensitive() {
    let f = fixture();
    assert!(f.run(DealFilter::for_organization(f.org_id).status("Closed-Won")).is_empty());
    assert!(f.run(DealFilter::for_organization(f.org_id).status("closed-won ")).is_empty());
}

#[test]
fn test_deal_spanning_two_years_matches_both() {
    let f = fixture();
    let id = f.spanning.id;

    assert!(f.run(DealFilter::for_organization(f.org_id).year(2023)).contains(&id));
    assert!(f.run(DealFilter::for_organization(f.org_id).year(2024)).contains(&id));
    assert!(!f.run(DealFilter::for_organization(f.org_id).year(2022)).contains(&id));
    assert!(!f.run(DealFilter::for_organization(f.org_id).year(2025)).contains(&id));
}

#[test]
fn test_year_inside_a_multi_year_deal_matches_without_endpoints() {
    let f = fixture();
    let found = f.run(DealFilter::for_organization(f.org_id).year(2024));
    assert_eq!(found, ids(&[&f.spanning, &f.multi_year]));
}

#[test]
fn test_single_day_deal_only_matches_its_year() {
    let f = fixture();
    let id = f.single_day_2022.id;
    assert!(f.run(DealFilter::for_organization(f.org_id).year(2022)).contains(&id));
    assert!(!f.run(DealFilter::for_organization(f.org_id).year(2023)).contains(&id));
}

#[test]
fn test_year_filter_agrees_with_interval_overlap() {
    let f = fixture();
    for year in 2020..=2027 {
        let expected: BTreeSet<i64> = f
            .all()
            .iter()
            .filter(|d| overlaps_year(d, year))
            .map(|d| d.id)
            .collect();
        assert_eq!(
            f.run(DealFilter::for_organization(f.org_id).year(year)),
            expected,
            "year {}",
            year
        );
    }
}

#[test]
fn test_year_boundaries_are_inclusive() {
    let conn = setup_test_db();
    let org = create_test_org(&conn, "Edges");
    let account = create_test_account(&conn, org.id, "Edge Account");
    let ends_new_year = create_test_deal(&conn, &account, "2023-01-01", "2024-01-01", 1.0, "proposal");
    let starts_new_years_eve = create_test_deal(&conn, &account, "2024-12-31", "2025-06-30", 1.0, "proposal");

    let found = deal_ids(
        &queries::list_deals_filtered(&conn, &DealFilter::for_organization(org.id).year(2024))
            .unwrap(),
    );
    assert!(found.contains(&ends_new_year.id));
    assert!(found.contains(&starts_new_years_eve.id));
}

#[test]
fn test_status_and_year_are_conjunctive() {
    let f = fixture();

    // closed-won matches full_2023 and single_day_2022; only one of them is in 2023
    let found = f.run(DealFilter::for_organization(f.org_id).status("closed-won").year(2023));
    assert_eq!(found, ids(&[&f.full_2023]));

    // negotiation exists, 2022 exists, but never on the same deal
    assert!(
        f.run(DealFilter::for_organization(f.org_id).status("negotiation").year(2022))
            .is_empty()
    );
}

#[test]
fn test_mapped_results_carry_typed_dates() {
    let f = fixture();
    let deals = queries::list_deals_filtered(
        &f.conn,
        &DealFilter::for_organization(f.org_id).status("negotiation"),
    )
    .unwrap();
    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0].start_date, date("2023-06-01"));
    assert_eq!(deals[0].end_date, date("2024-05-31"));
    assert_eq!(deals[0].value, 75000.0);
}

#[test]
fn test_invalid_filter_is_rejected_before_storage() {
    // No schema: any query that reached SQLite would fail with a database error
    let conn = Connection::open_in_memory().unwrap();

    for filter in [
        DealFilter::for_organization(0),
        DealFilter::for_organization(1).year(0),
        DealFilter::for_organization(1).year(12024),
        DealFilter::for_organization(1).status(""),
    ] {
        let result = queries::list_deals_filtered(&conn, &filter);
        assert!(
            matches!(result, Err(AppError::Validation(_))),
            "{:?} should fail validation",
            filter
        );
    }
}

#[test]
fn test_parsed_filter_drives_query() {
    let f = fixture();
    let filter = DealFilter::parse(&f.org_id.to_string(), Some("proposal"), Some("2025")).unwrap();
    assert_eq!(f.run(filter), ids(&[&f.multi_year]));
}

#[test]
fn test_scenario_single_closed_won_deal() {
    let conn = setup_test_db();
    let org = create_test_org(&conn, "Acme Corporation");
    let account = create_test_account(&conn, org.id, "Acme Sales");
    create_test_deal(&conn, &account, "2023-01-01", "2023-12-31", 50000.0, "closed-won");
    create_test_deal(&conn, &account, "2023-06-01", "2024-05-31", 75000.0, "negotiation");

    let deals = queries::list_deals_filtered(&conn, &DealFilter::for_organization(1).status("closed-won"))
        .unwrap();

    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0].value, 50000.0);
    assert_eq!(deals[0].status, "closed-won");
}
