use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::Arc;

use anyhow::{Context, Result};
use csv::{Reader, Writer};
use log::info;
use rust_decimal::Decimal;

use super::connection::CsvConnection;
use super::member_repository::MemberRepository;
use crate::domain::calendar;
use crate::domain::models::contribution::Contribution;
use crate::storage::traits::{ContributionStorage, MemberStorage};

/// CSV-based contribution ledger repository.
///
/// Every mutation reads the member's whole ledger, applies the change in
/// memory, and rewrites the file in one truncating write. A batch append is
/// therefore all-or-nothing: a failure before the write leaves the ledger
/// untouched.
#[derive(Clone)]
pub struct ContributionRepository {
    connection: CsvConnection,
    member_repository: MemberRepository,
}

impl ContributionRepository {
    /// Create a new CSV contribution repository
    pub fn new(connection: CsvConnection) -> Self {
        let member_repository = MemberRepository::new(Arc::new(connection.clone()));
        Self {
            connection,
            member_repository,
        }
    }

    /// Read all ledger records for a member from their CSV file
    fn read_contributions(&self, member_id: &str) -> Result<Vec<Contribution>> {
        self.connection.ensure_contributions_file_exists(member_id)?;

        let file_path = self.connection.get_contributions_file_path(member_id);

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut contributions = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            let amount: Decimal = record
                .get(2)
                .unwrap_or("")
                .parse()
                .with_context(|| format!("Failed to parse amount in {}", file_path.display()))?;
            let payment_date =
                chrono::NaiveDate::parse_from_str(record.get(3).unwrap_or(""), "%Y-%m-%d")
                    .with_context(|| {
                        format!("Failed to parse payment_date in {}", file_path.display())
                    })?;
            let created_at = chrono::DateTime::parse_from_rfc3339(record.get(6).unwrap_or(""))
                .with_context(|| format!("Failed to parse created_at in {}", file_path.display()))?
                .with_timezone(&chrono::Utc);
            let notes = match record.get(5) {
                Some("") | None => None,
                Some(s) => Some(s.to_string()),
            };

            contributions.push(Contribution {
                id: record.get(0).unwrap_or("").to_string(),
                member_id: record.get(1).unwrap_or("").to_string(),
                amount,
                payment_date,
                receipt_number: record.get(4).unwrap_or("").to_string(),
                notes,
                created_at,
            });
        }

        Ok(contributions)
    }

    /// Write all ledger records for a member to their CSV file
    fn write_contributions(&self, member_id: &str, contributions: &[Contribution]) -> Result<()> {
        let file_path = self.connection.get_contributions_file_path(member_id);

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)?;

        let writer = BufWriter::new(file);
        let mut csv_writer = Writer::from_writer(writer);

        csv_writer.write_record(&[
            "id",
            "member_id",
            "amount",
            "payment_date",
            "receipt_number",
            "notes",
            "created_at",
        ])?;

        for contribution in contributions {
            csv_writer.write_record(&[
                &contribution.id,
                &contribution.member_id,
                &contribution.amount.to_string(),
                &contribution.payment_date.format("%Y-%m-%d").to_string(),
                &contribution.receipt_number,
                &contribution.notes.clone().unwrap_or_default(),
                &contribution.created_at.to_rfc3339(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Chronological order within a ledger file: period first, then creation
    fn sort_ledger(contributions: &mut [Contribution]) {
        contributions.sort_by(|a, b| {
            a.payment_date
                .cmp(&b.payment_date)
                .then(a.created_at.cmp(&b.created_at))
        });
    }
}

impl ContributionStorage for ContributionRepository {
    fn append_contributions(&self, member_id: &str, records: &[Contribution]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        info!(
            "Appending {} ledger record(s) for member '{}'",
            records.len(),
            member_id
        );

        let mut contributions = self.read_contributions(member_id)?;
        contributions.extend_from_slice(records);
        Self::sort_ledger(&mut contributions);

        self.write_contributions(member_id, &contributions)
    }

    fn get_contribution(&self, member_id: &str, record_id: &str) -> Result<Option<Contribution>> {
        Ok(self
            .read_contributions(member_id)?
            .into_iter()
            .find(|c| c.id == record_id))
    }

    fn list_contributions(&self, member_id: &str) -> Result<Vec<Contribution>> {
        let mut contributions = self.read_contributions(member_id)?;
        Self::sort_ledger(&mut contributions);
        Ok(contributions)
    }

    fn monthly_total(&self, member_id: &str, year: i32, month: u32) -> Result<Decimal> {
        let total = self
            .read_contributions(member_id)?
            .iter()
            .filter(|c| calendar::period(c.payment_date) == (year, month))
            .fold(Decimal::ZERO, |acc, c| acc + c.amount);
        Ok(total)
    }

    fn update_contribution(&self, record: &Contribution) -> Result<()> {
        let mut contributions = self.read_contributions(&record.member_id)?;

        let pos = contributions
            .iter()
            .position(|c| c.id == record.id)
            .ok_or_else(|| anyhow::anyhow!("No ledger record with id {}", record.id))?;

        contributions[pos] = record.clone();
        Self::sort_ledger(&mut contributions);

        self.write_contributions(&record.member_id, &contributions)
    }

    fn delete_contribution(&self, member_id: &str, record_id: &str) -> Result<bool> {
        let mut contributions = self.read_contributions(member_id)?;
        let original_len = contributions.len();
        contributions.retain(|c| c.id != record_id);

        if contributions.len() < original_len {
            self.write_contributions(member_id, &contributions)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn find_member_for_record(&self, record_id: &str) -> Result<Option<String>> {
        for member in self.member_repository.list_members()? {
            let contributions = self.read_contributions(&member.id)?;
            if contributions.iter().any(|c| c.id == record_id) {
                return Ok(Some(member.id));
            }
        }
        Ok(None)
    }
}
