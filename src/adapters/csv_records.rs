use crate::domain::model::{OutputFormat, Pairing, Participant, PriorAssignments};
use crate::utils::error::{Result, SantaError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const NAME_COLUMN: &str = "Employee_Name";
pub const EMAIL_COLUMN: &str = "Employee_EmailID";
pub const CHILD_NAME_COLUMN: &str = "Secret_Child_Name";
pub const CHILD_EMAIL_COLUMN: &str = "Secret_Child_EmailID";

#[derive(Debug, Deserialize)]
struct ParticipantRecord {
    #[serde(rename = "Employee_Name")]
    name: String,
    #[serde(rename = "Employee_EmailID")]
    email: String,
}

#[derive(Debug, Deserialize)]
struct HistoryRecord {
    #[serde(rename = "Employee_EmailID")]
    email: String,
    #[serde(rename = "Secret_Child_EmailID")]
    child_email: String,
}

/// 輸出檔的一列，欄位名稱與歷史檔相容，可直接當作下一輪的 history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    #[serde(rename = "Employee_Name")]
    pub name: String,
    #[serde(rename = "Employee_EmailID")]
    pub email: String,
    #[serde(rename = "Secret_Child_Name")]
    pub child_name: String,
    #[serde(rename = "Secret_Child_EmailID")]
    pub child_email: String,
}

impl From<&Pairing> for AssignmentRecord {
    fn from(pairing: &Pairing) -> Self {
        Self {
            name: pairing.giver.name.clone(),
            email: pairing.giver.id.clone(),
            child_name: pairing.recipient.name.clone(),
            child_email: pairing.recipient.id.clone(),
        }
    }
}

/// 多出來的欄位直接忽略，缺少的欄位仍會在反序列化時報錯
fn reader(data: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data)
}

fn require_columns(file: &str, headers: &csv::StringRecord, columns: &[&str]) -> Result<()> {
    for column in columns {
        if !headers.iter().any(|header| header == *column) {
            return Err(SantaError::InputError {
                file: file.to_string(),
                line: 1,
                message: format!("missing column '{}'", column),
            });
        }
    }
    Ok(())
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

/// 讀取參加者名單，保留檔案中的順序
pub fn parse_participants(file: &str, data: &[u8]) -> Result<Vec<Participant>> {
    let mut reader = reader(data);
    let headers = reader.headers()?.clone();
    require_columns(file, &headers, &[NAME_COLUMN, EMAIL_COLUMN])?;

    let mut participants = Vec::new();
    let mut seen = HashSet::new();
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        let line = line_of(&record);
        let row: ParticipantRecord = record.deserialize(Some(&headers))?;

        if row.email.is_empty() {
            return Err(SantaError::InputError {
                file: file.to_string(),
                line,
                message: format!("empty {}", EMAIL_COLUMN),
            });
        }
        if row.name.is_empty() {
            return Err(SantaError::InputError {
                file: file.to_string(),
                line,
                message: format!("empty {}", NAME_COLUMN),
            });
        }
        if !seen.insert(row.email.clone()) {
            tracing::warn!("⚠️ Duplicate participant id '{}' at {}:{}", row.email, file, line);
        }

        participants.push(Participant::new(row.email, row.name));
    }

    if participants.is_empty() {
        return Err(SantaError::ValidationError {
            message: format!("'{}' contains no participants", file),
        });
    }

    tracing::debug!("Parsed {} participants from {}", participants.len(), file);
    Ok(participants)
}

/// 讀取前一輪的分配；同一 giver 出現多次時以最後一筆為準
pub fn parse_history(file: &str, data: &[u8]) -> Result<PriorAssignments> {
    let mut reader = reader(data);
    let headers = reader.headers()?.clone();
    // 空白的歷史檔等同於沒有歷史
    if headers.is_empty() {
        tracing::info!("History file '{}' is empty, starting without prior assignments", file);
        return Ok(PriorAssignments::new());
    }
    require_columns(file, &headers, &[EMAIL_COLUMN, CHILD_EMAIL_COLUMN])?;

    let mut prior = PriorAssignments::new();
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        let row: HistoryRecord = record.deserialize(Some(&headers))?;
        if row.email.is_empty() || row.child_email.is_empty() {
            tracing::warn!(
                "⚠️ Skipping incomplete history row at {}:{}",
                file,
                line_of(&record)
            );
            continue;
        }
        prior.insert(row.email, row.child_email);
    }

    tracing::debug!("Parsed {} prior assignments from {}", prior.len(), file);
    Ok(prior)
}

pub fn encode_assignments(pairings: &[Pairing], format: OutputFormat) -> Result<Vec<u8>> {
    let records: Vec<AssignmentRecord> = pairings.iter().map(AssignmentRecord::from).collect();

    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in &records {
                writer.serialize(record)?;
            }
            writer
                .into_inner()
                .map_err(|e| SantaError::IoError(e.into_error()))
        }
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(&records)?),
    }
}
