//! Demo fixture data: five organizations with two accounts each and a spread
//! of deals across 2023 and 2024.

use rusqlite::{Connection, params};

use crate::error::Result;

const ORGANIZATIONS: [&str; 5] = [
    "Acme Corporation",
    "Globex Industries",
    "Stark Enterprises",
    "Wayne Industries",
    "Umbrella Corporation",
];

/// (name, organization_id)
const ACCOUNTS: [(&str, i64); 10] = [
    ("Acme Sales", 1),
    ("Acme Marketing", 1),
    ("Globex Research", 2),
    ("Globex Development", 2),
    ("Stark Innovation", 3),
    ("Stark Defense", 3),
    ("Wayne Technology", 4),
    ("Wayne Philanthropy", 4),
    ("Umbrella Biotech", 5),
    ("Umbrella Security", 5),
];

struct FixtureDeal {
    account_id: i64,
    organization_id: i64,
    start_date: &'static str,
    end_date: &'static str,
    value: f64,
    status: &'static str,
}

const DEALS: [FixtureDeal; 11] = [
    FixtureDeal { account_id: 1, organization_id: 1, start_date: "2023-01-01", end_date: "2023-12-31", value: 50000.0, status: "closed-won" },
    FixtureDeal { account_id: 1, organization_id: 1, start_date: "2023-06-01", end_date: "2024-05-31", value: 75000.0, status: "negotiation" },
    FixtureDeal { account_id: 2, organization_id: 1, start_date: "2023-03-15", end_date: "2023-09-15", value: 30000.0, status: "closed-won" },
    FixtureDeal { account_id: 3, organization_id: 2, start_date: "2023-01-01", end_date: "2024-01-01", value: 100000.0, status: "proposal" },
    FixtureDeal { account_id: 4, organization_id: 2, start_date: "2023-07-01", end_date: "2024-12-31", value: 250000.0, status: "qualified" },
    FixtureDeal { account_id: 5, organization_id: 3, start_date: "2023-02-15", end_date: "2024-02-14", value: 500000.0, status: "closed-won" },
    FixtureDeal { account_id: 6, organization_id: 3, start_date: "2023-09-01", end_date: "2024-08-31", value: 750000.0, status: "negotiation" },
    FixtureDeal { account_id: 7, organization_id: 4, start_date: "2023-03-01", end_date: "2023-12-31", value: 125000.0, status: "closed-won" },
    FixtureDeal { account_id: 8, organization_id: 4, start_date: "2023-05-15", end_date: "2024-05-14", value: 200000.0, status: "proposal" },
    FixtureDeal { account_id: 9, organization_id: 5, start_date: "2023-04-01", end_date: "2023-10-31", value: 150000.0, status: "closed-lost" },
    FixtureDeal { account_id: 10, organization_id: 5, start_date: "2023-08-15", end_date: "2024-08-14", value: 300000.0, status: "prospecting" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub organizations: usize,
    pub accounts: usize,
    pub deals: usize,
}

/// Wipe all rows, reset AUTOINCREMENT counters, and load the fixtures.
///
/// Runs in one transaction so a failure leaves the previous data in place.
/// Ids restart at 1, which the fixture foreign keys rely on.
pub fn seed_fixtures(conn: &Connection) -> Result<SeedSummary> {
    let tx = conn.unchecked_transaction()?;

    // Children first: foreign keys are enforced.
    tx.execute_batch(
        "DELETE FROM deals;
         DELETE FROM accounts;
         DELETE FROM organizations;
         DELETE FROM sqlite_sequence WHERE name IN ('organizations', 'accounts', 'deals');",
    )?;

    {
        let mut insert_org = tx.prepare("INSERT INTO organizations (name) VALUES (?1)")?;
        for name in ORGANIZATIONS {
            insert_org.execute(params![name])?;
        }

        let mut insert_account =
            tx.prepare("INSERT INTO accounts (name, organization_id) VALUES (?1, ?2)")?;
        for (name, organization_id) in ACCOUNTS {
            insert_account.execute(params![name, organization_id])?;
        }

        let mut insert_deal = tx.prepare(
            "INSERT INTO deals (account_id, organization_id, start_date, end_date, value, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for deal in &DEALS {
            insert_deal.execute(params![
                deal.account_id,
                deal.organization_id,
                deal.start_date,
                deal.end_date,
                deal.value,
                deal.status
            ])?;
        }
    }

    tx.commit()?;

    Ok(SeedSummary {
        organizations: ORGANIZATIONS.len(),
        accounts: ACCOUNTS.len(),
        deals: DEALS.len(),
    })
}
