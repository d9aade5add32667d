//! Output records and their line-delimited JSON encoding.

use crate::core::WindowedBucket;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One line of the output series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Minute formatted as `YYYY-MM-DD HH:MM:SS`
    pub date: String,
    pub average_delivery_time: f64,
}

impl From<&WindowedBucket> for OutputRecord {
    fn from(bucket: &WindowedBucket) -> Self {
        Self {
            date: bucket.minute.to_string(),
            average_delivery_time: bucket.average_delivery_time,
        }
    }
}

/// Convert windowed buckets to output records, preserving order.
pub fn to_records(windowed: &[WindowedBucket]) -> Vec<OutputRecord> {
    windowed.iter().map(OutputRecord::from).collect()
}

/// Write one JSON object per line. No records means no bytes.
pub fn write_records<W: Write>(mut writer: W, records: &[OutputRecord]) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record).map_err(std::io::Error::other)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let records = vec![
            OutputRecord {
                date: "2018-12-26 18:11:00".to_string(),
                average_delivery_time: 0.0,
            },
            OutputRecord {
                date: "2018-12-26 18:12:00".to_string(),
                average_delivery_time: 25.5,
            },
        ];
        let mut buf = Vec::new();
        write_records(&mut buf, &records).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\"date\":\"2018-12-26 18:11:00\",\"average_delivery_time\":0.0}\n\
             {\"date\":\"2018-12-26 18:12:00\",\"average_delivery_time\":25.5}\n"
        );
    }

    #[test]
    fn test_no_records_writes_nothing() {
        let mut buf = Vec::new();
        write_records(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
    }
}
