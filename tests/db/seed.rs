//! Demo fixture loading

#[path = "../common/mod.rs"]
mod common;

use std::collections::BTreeSet;

use common::*;

#[test]
fn test_seed_loads_fixture_counts() {
    let conn = setup_test_db();
    let summary = seed_fixtures(&conn).expect("Seeding failed");

    assert_eq!(summary.organizations, 5);
    assert_eq!(summary.accounts, 10);
    assert_eq!(summary.deals, 11);

    assert_eq!(queries::list_organizations(&conn).unwrap().len(), 5);
    assert_eq!(queries::list_accounts(&conn).unwrap().len(), 10);
    assert_eq!(queries::list_deals(&conn).unwrap().len(), 11);
}

#[test]
fn test_every_organization_has_two_accounts() {
    let conn = setup_test_db();
    seed_fixtures(&conn).unwrap();

    for org in queries::list_organizations(&conn).unwrap() {
        let (accounts, deals) = queries::count_organization_dependents(&conn, org.id).unwrap();
        assert_eq!(accounts, 2, "{} should have two accounts", org.name);
        assert!(deals >= 2, "{} should have deals", org.name);
    }
}

#[test]
fn test_fixture_deals_agree_with_their_accounts() {
    let conn = setup_test_db();
    seed_fixtures(&conn).unwrap();

    for deal in queries::list_deals(&conn).unwrap() {
        let account = queries::get_account_by_id(&conn, deal.account_id)
            .unwrap()
            .expect("deal should reference an existing account");
        assert_eq!(account.organization_id, deal.organization_id);
        assert!(deal.start_date <= deal.end_date);
    }
}

#[test]
fn test_reseeding_replaces_data_and_restarts_ids() {
    let conn = setup_test_db();
    seed_fixtures(&conn).unwrap();
    create_test_org(&conn, "Extra");

    seed_fixtures(&conn).expect("Reseeding failed");

    let orgs = queries::list_organizations(&conn).unwrap();
    assert_eq!(orgs.len(), 5);
    assert_eq!(orgs.first().map(|o| o.id), Some(1));
    assert_eq!(orgs.first().map(|o| o.name.as_str()), Some("Acme Corporation"));
    assert_eq!(queries::list_deals(&conn).unwrap().len(), 11);
}

#[test]
fn test_first_organization_closed_won_deals() {
    let conn = setup_test_db();
    seed_fixtures(&conn).unwrap();

    let deals =
        queries::list_deals_filtered(&conn, &DealFilter::for_organization(1).status("closed-won"))
            .unwrap();

    let values: BTreeSet<i64> = deals.iter().map(|d| d.value as i64).collect();
    assert_eq!(values, BTreeSet::from([30000, 50000]));
}

#[test]
fn test_first_organization_deals_in_2024() {
    let conn = setup_test_db();
    seed_fixtures(&conn).unwrap();

    let deals =
        queries::list_deals_filtered(&conn, &DealFilter::for_organization(1).year(2024)).unwrap();

    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0].value, 75000.0);
    assert_eq!(deals[0].status, "negotiation");
}
