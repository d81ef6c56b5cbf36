use crate::stats::normalize::MonthlyRecord;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct CumulativeTotals {
    pub book_count: u64,
    pub chapter_count: u64,
    pub word_count: u64,
}

impl CumulativeTotals {
    fn add(&mut self, record: &MonthlyRecord) {
        self.book_count = self.book_count.saturating_add(record.book_count);
        self.chapter_count = self.chapter_count.saturating_add(record.chapter_count);
        self.word_count = self.word_count.saturating_add(record.word_count);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyRecord {
    pub year: i32,
    pub book_count: u64,
    pub chapter_count: u64,
    pub word_count: u64,
    /// Descending by month.
    pub months: Vec<MonthlyRecord>,
}

/// Sums the records overall and per year. Years come back most recent first.
pub fn aggregate(records: &[MonthlyRecord]) -> (CumulativeTotals, Vec<YearlyRecord>) {
    let mut totals = CumulativeTotals::default();
    let mut by_year: BTreeMap<i32, (CumulativeTotals, Vec<MonthlyRecord>)> = BTreeMap::new();

    for record in records {
        totals.add(record);
        let (year_totals, months) = by_year.entry(record.year).or_default();
        year_totals.add(record);
        months.push(record.clone());
    }

    let yearly = by_year
        .into_iter()
        .rev()
        .map(|(year, (year_totals, mut months))| {
            months.sort_by(|a, b| b.month.cmp(&a.month));
            YearlyRecord {
                year,
                book_count: year_totals.book_count,
                chapter_count: year_totals.chapter_count,
                word_count: year_totals.word_count,
                months,
            }
        })
        .collect();

    (totals, yearly)
}
