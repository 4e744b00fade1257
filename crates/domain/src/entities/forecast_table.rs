//! Short-range forecast table
//!
//! The provider returns a forecast as a flat list of
//! `(date, time, category, value)` records. [`ForecastTableBuilder`] folds
//! that list into a nested `date -> time -> category -> value` table.
//! Dates and time slots keep the order in which they first appear in the
//! input; the provider already emits them chronologically.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// One flat forecast record as delivered by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Forecast date, `YYYYMMDD`
    pub date: String,
    /// Forecast time slot, `HHMM`
    pub time: String,
    /// Category code
    pub category: String,
    /// Value, as sent by the provider
    pub value: String,
}

impl ForecastRecord {
    /// Create a record
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        category: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            category: category.into(),
            value: value.into(),
        }
    }
}

/// Category values for one time slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSlot {
    time: String,
    values: BTreeMap<String, String>,
}

impl ForecastSlot {
    /// Time slot, `HHMM`
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Raw value of a category
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&str> {
        self.values.get(category).map(String::as_str)
    }

    /// Iterate `(category, value)` pairs in category order
    pub fn categories(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of categories in this slot (never zero)
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: a slot is only created together with its first value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Time slots of one forecast date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    date: String,
    slots: Vec<ForecastSlot>,
}

impl ForecastDay {
    /// Forecast date, `YYYYMMDD`
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Slots in input order
    #[must_use]
    pub fn slots(&self) -> &[ForecastSlot] {
        &self.slots
    }

    /// Slot for a given `HHMM` time
    #[must_use]
    pub fn slot(&self, time: &str) -> Option<&ForecastSlot> {
        self.slots.iter().find(|slot| slot.time == time)
    }

    /// The slot at `preferred` time, or the day's first slot
    #[must_use]
    pub fn slot_or_first(&self, preferred: &str) -> Option<&ForecastSlot> {
        self.slot(preferred).or_else(|| self.slots.first())
    }
}

/// Nested forecast table, `date -> time -> category -> value`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastTable {
    days: Vec<ForecastDay>,
}

impl ForecastTable {
    /// Build a table from records in provider order
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ForecastRecord>,
    {
        let mut builder = ForecastTableBuilder::default();
        for record in records {
            builder.insert(record);
        }
        builder.build()
    }

    /// Dates in input order
    #[must_use]
    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }

    /// Date keys in input order
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.days.iter().map(ForecastDay::date)
    }

    /// Entry for a `YYYYMMDD` date
    #[must_use]
    pub fn day(&self, date: &str) -> Option<&ForecastDay> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Entry for a date and `HHMM` time
    #[must_use]
    pub fn slot(&self, date: &str, time: &str) -> Option<&ForecastSlot> {
        self.day(date).and_then(|day| day.slot(time))
    }

    /// Single value lookup
    #[must_use]
    pub fn get(&self, date: &str, time: &str, category: &str) -> Option<&str> {
        self.slot(date, time).and_then(|slot| slot.get(category))
    }

    /// Earliest slot of the table
    #[must_use]
    pub fn first_slot(&self) -> Option<&ForecastSlot> {
        self.days.first().and_then(|day| day.slots.first())
    }

    /// Number of distinct dates
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the table holds no dates
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Incremental construction of a [`ForecastTable`]
///
/// Dates and slots live in `Vec`s for first-seen order; the side maps give
/// keyed lookup into them.
#[derive(Debug, Default)]
pub struct ForecastTableBuilder {
    days: Vec<ForecastDay>,
    day_index: HashMap<String, usize>,
    /// Per-day `time -> slot position`, parallel to `days`
    slot_index: Vec<HashMap<String, usize>>,
}

impl ForecastTableBuilder {
    /// Insert one record, creating its date and slot entries when absent.
    /// A repeated `(date, time, category)` triple overwrites the earlier value.
    pub fn insert(&mut self, record: ForecastRecord) -> &mut Self {
        let ForecastRecord {
            date,
            time,
            category,
            value,
        } = record;

        let day_position = match self.day_index.get(&date) {
            Some(&position) => position,
            None => {
                let position = self.days.len();
                self.day_index.insert(date.clone(), position);
                self.days.push(ForecastDay {
                    date,
                    slots: Vec::new(),
                });
                self.slot_index.push(HashMap::new());
                position
            },
        };
        let day = &mut self.days[day_position];
        let slots = &mut self.slot_index[day_position];

        let slot_position = match slots.get(&time) {
            Some(&position) => position,
            None => {
                let position = day.slots.len();
                slots.insert(time.clone(), position);
                day.slots.push(ForecastSlot {
                    time,
                    values: BTreeMap::new(),
                });
                position
            },
        };

        day.slots[slot_position].values.insert(category, value);
        self
    }

    /// Finish construction
    #[must_use]
    pub fn build(self) -> ForecastTable {
        ForecastTable { days: self.days }
    }
}
