use chrono::NaiveDate;
use serde::Serialize;

/// Row labels, in Portuguese like the rest of the report surface.
pub const LABEL_PAIR: &str = "Ponto";
pub const LABEL_VACATION: &str = "Férias (abonado)";
pub const LABEL_HOLIDAY: &str = "Feriado/Recesso (abonado)";

/// One flat report row. A punch pair becomes a single row: start time
/// filled, end column left empty, duration filled. Justified intervals
/// carry start, end and duration; synthesized vacation/holiday rows carry
/// only the date and label.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    #[serde(skip)]
    pub date: NaiveDate,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario: Option<String>,
    pub tipo: String,
    pub horario_inicio: String,
    pub horario_fim: String,
    pub duracao: String,
}

impl ReportRow {
    pub fn new(date: NaiveDate, usuario: Option<String>, tipo: &str) -> Self {
        Self {
            date,
            data: date.format("%d/%m/%Y").to_string(),
            usuario,
            tipo: tipo.to_string(),
            horario_inicio: String::new(),
            horario_fim: String::new(),
            duracao: String::new(),
        }
    }
}

/// CSV header; the `Usuário` column appears only on multi-user exports.
pub(crate) fn headers(with_user: bool) -> Vec<&'static str> {
    if with_user {
        vec![
            "Data",
            "Usuário",
            "Tipo",
            "Horário início",
            "Horário fim",
            "Duração",
        ]
    } else {
        vec!["Data", "Tipo", "Horário início", "Horário fim", "Duração"]
    }
}

pub(crate) fn row_to_record(row: &ReportRow, with_user: bool) -> Vec<String> {
    let mut rec = vec![row.data.clone()];
    if with_user {
        rec.push(row.usuario.clone().unwrap_or_default());
    }
    rec.extend([
        row.tipo.clone(),
        row.horario_inicio.clone(),
        row.horario_fim.clone(),
        row.duracao.clone(),
    ]);
    rec
}
