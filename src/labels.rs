use crate::error::LabelsError;
use time::Month;

static MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static WEEKDAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Display names for the months and for the weekday header of the day grid
/// (Sunday first)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Labels {
    months: [String; 12],
    weekdays: [String; 7],
}

impl Labels {
    pub fn with_months<I, S>(mut self, labels: I) -> Result<Labels, LabelsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = labels.into_iter().map(Into::into).collect::<Vec<String>>();
        self.months = <[String; 12]>::try_from(labels).map_err(|v| LabelsError::Months(v.len()))?;
        Ok(self)
    }

    pub fn with_weekdays<I, S>(mut self, labels: I) -> Result<Labels, LabelsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = labels.into_iter().map(Into::into).collect::<Vec<String>>();
        self.weekdays =
            <[String; 7]>::try_from(labels).map_err(|v| LabelsError::Weekdays(v.len()))?;
        Ok(self)
    }

    pub fn month(&self, month: Month) -> &str {
        &self.months[usize::from(u8::from(month)) - 1]
    }

    pub fn weekdays(&self) -> &[String; 7] {
        &self.weekdays
    }
}

impl Default for Labels {
    fn default() -> Labels {
        Labels {
            months: MONTH_LABELS.map(String::from),
            weekdays: WEEKDAY_LABELS.map(String::from),
        }
    }
}
