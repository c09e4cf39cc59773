//! 날씨 로그 내보내기 (CSV / XLSX)
//!
//! 두 형식은 같은 열 목록([`EXPORT_COLUMNS`])과 같은 행 변환([`export_row`])을 사용합니다.
//! 날짜는 `EXPORT_UTC_OFFSET_MINUTES` 기준 현지 시각으로 출력됩니다.

use std::sync::Arc;

use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, XlsxError};
use singleton_macro::service;

use crate::config::ExportConfig;
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::dto::weather::request::{ExportQuery, non_blank};
use crate::domain::entities::weather::WeatherLog;
use crate::repositories::weather::{LogFilter, WeatherLogRepository};
use crate::utils::date_utils::{format_local, parse_datetime, to_bson};

pub const EXPORT_COLUMNS: [&str; 13] = [
    "ID Externo",
    "Cidade",
    "Latitude",
    "Longitude",
    "Temperatura (°C)",
    "Umidade (%)",
    "Velocidade do Vento (km/h)",
    "Condição",
    "Precipitação (mm)",
    "Insights",
    "Pokémons Sugeridos",
    "Data/Hora",
    "Criado em",
];

pub const EMPTY_CSV_BODY: &str = "Nenhum dado encontrado";
pub const SHEET_NAME: &str = "Logs Climáticos";
const COLUMN_WIDTH: f64 = 20.0;
const HEADER_FILL: u32 = 0x4472C4;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn to_csv_field(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            // f64의 Display는 정수값을 소수점 없이 출력합니다 (25.0 → "25")
            Cell::Number(number) => number.to_string(),
        }
    }
}

/// 로그 한 건을 열 순서대로 변환합니다.
pub fn export_row(log: &WeatherLog, offset_minutes: i32) -> Vec<Cell> {
    vec![
        Cell::Text(log.external_id.clone()),
        Cell::Text(log.location.city.clone()),
        Cell::Number(log.location.lat),
        Cell::Number(log.location.lon),
        Cell::Number(log.weather.temperature),
        Cell::Number(log.weather.humidity),
        Cell::Number(log.weather.wind_speed),
        Cell::Text(log.weather.condition.clone()),
        Cell::Number(log.weather.precipitation_mm.unwrap_or(0.0)),
        Cell::Text(log.insights.join(" | ")),
        Cell::Text(log.pokemon_names().join(", ")),
        Cell::Text(format_local(log.timestamp, offset_minutes)),
        Cell::Text(
            log.created_at
                .map(|created| format_local(created, offset_minutes))
                .unwrap_or_else(|| "N/A".to_string()),
        ),
    ]
}

/// 쿼리 → 조회 조건. 날짜는 로그 생성 시와 같은 규칙으로 해석합니다.
pub fn export_filter(query: &ExportQuery) -> Result<LogFilter, AppError> {
    let start = non_blank(&query.start_date).map(parse_datetime).transpose()?;
    let end = non_blank(&query.end_date).map(parse_datetime).transpose()?;

    Ok(LogFilter {
        city: non_blank(&query.city).map(str::to_string),
        start: start.map(to_bson),
        end: end.map(to_bson),
    })
}

pub fn render_csv(logs: &[WeatherLog], offset_minutes: i32) -> Result<String, AppError> {
    if logs.is_empty() {
        return Ok(EMPTY_CSV_BODY.to_string());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS).context("CSV 생성 실패")?;
    for log in logs {
        let fields: Vec<String> = export_row(log, offset_minutes).iter().map(Cell::to_csv_field).collect();
        writer.write_record(&fields).context("CSV 생성 실패")?;
    }

    let bytes = writer.into_inner().context("CSV 생성 실패")?;
    let mut body = String::from_utf8(bytes).context("CSV 인코딩 실패")?;

    // 행 구분자만 있고 마지막 행 뒤에는 줄바꿈이 없습니다
    if body.ends_with('\n') {
        body.pop();
    }

    Ok(body)
}

fn write_workbook(logs: &[WeatherLog], offset_minutes: i32) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    if !logs.is_empty() {
        let header = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_pattern(FormatPattern::Solid);

        for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
            let col = col as u16;
            sheet.write_string_with_format(0, col, *title, &header)?;
            sheet.set_column_width(col, COLUMN_WIDTH)?;
        }

        for (index, log) in logs.iter().enumerate() {
            let row = index as u32 + 1;
            for (col, cell) in export_row(log, offset_minutes).into_iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(text) => sheet.write_string(row, col, text)?,
                    Cell::Number(number) => sheet.write_number(row, col, number)?,
                };
            }
        }
    }

    workbook.save_to_buffer()
}

pub fn render_xlsx(logs: &[WeatherLog], offset_minutes: i32) -> Result<Vec<u8>, AppError> {
    write_workbook(logs, offset_minutes).context("XLSX 생성 실패")
}

#[service(name = "export")]
pub struct ExportService {
    weather_repo: Arc<WeatherLogRepository>,
}

impl ExportService {
    async fn load(&self, query: &ExportQuery) -> Result<Vec<WeatherLog>, AppError> {
        let filter = export_filter(query)?;
        let logs = self.weather_repo.find_for_export(&filter).await?;
        log::info!("📤 내보내기 대상 로그: {}건", logs.len());
        Ok(logs)
    }

    pub async fn export_csv(&self, query: &ExportQuery) -> Result<String, AppError> {
        let logs = self.load(query).await?;
        render_csv(&logs, ExportConfig::utc_offset_minutes())
    }

    pub async fn export_xlsx(&self, query: &ExportQuery) -> Result<Vec<u8>, AppError> {
        let logs = self.load(query).await?;
        render_xlsx(&logs, ExportConfig::utc_offset_minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::weather::{Location, PokemonSuggestion, WeatherData};
    use mongodb::bson::DateTime;

    fn log(city: &str, insights: Vec<&str>) -> WeatherLog {
        WeatherLog {
            id: None,
            external_id: "ext-1".into(),
            location: Location { city: city.into(), lat: -23.55, lon: -46.63 },
            weather: WeatherData {
                temperature: 25.0,
                humidity: 60.0,
                wind_speed: 10.5,
                condition: "céu limpo".into(),
                precipitation_mm: None,
            },
            insights: insights.into_iter().map(String::from).collect(),
            pokemon_suggestions: vec![
                PokemonSuggestion { name: "pikachu".into(), reasoning: "r".into(), pokemon_data: None },
                PokemonSuggestion { name: "eevee".into(), reasoning: "r".into(), pokemon_data: None },
            ],
            // 2025-12-03T10:00:00Z
            timestamp: DateTime::from_millis(1_764_756_000_000),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_export_row_values() {
        let row = export_row(&log("São Paulo", vec!["Calor", "Seco"]), -180);

        assert_eq!(row.len(), EXPORT_COLUMNS.len());
        assert_eq!(row[8], Cell::Number(0.0));
        assert_eq!(row[9], Cell::Text("Calor | Seco".into()));
        assert_eq!(row[10], Cell::Text("pikachu, eevee".into()));
        assert_eq!(row[11], Cell::Text("03/12/2025, 07:00:00".into()));
        assert_eq!(row[12], Cell::Text("N/A".into()));
    }

    #[test]
    fn test_csv_empty_body() {
        assert_eq!(render_csv(&[], -180).unwrap(), EMPTY_CSV_BODY);
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let csv = render_csv(&[log("Rio, RJ", vec!["diz \"oi\""])], 0).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next().unwrap(), EXPORT_COLUMNS.join(","));
        let row = lines.next().unwrap();
        assert!(row.starts_with("ext-1,\"Rio, RJ\",-23.55,-46.63,25,60,10.5,céu limpo,0,"));
        assert!(row.contains("\"diz \"\"oi\"\"\""));
        assert!(row.contains("\"pikachu, eevee\""));
        assert!(row.ends_with("\"03/12/2025, 10:00:00\",N/A"));
    }

    #[test]
    fn test_csv_has_no_trailing_newline() {
        let records = vec![log("Recife", vec![]), log("Natal", vec![])];
        let csv = render_csv(&records, 0).unwrap();

        assert!(!csv.ends_with('\n'));
        assert_eq!(csv.split('\n').count(), 3);
        assert!(!csv.contains('\r'));
    }

    #[test]
    fn test_xlsx_is_zip_archive() {
        let bytes = render_xlsx(&[log("Recife", vec![])], -180).unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let empty = render_xlsx(&[], -180).unwrap();
        assert_eq!(&empty[..2], b"PK");
    }

    #[test]
    fn test_export_filter_parses_dates() {
        let query = ExportQuery {
            city: Some("Recife".into()),
            start_date: Some("2025-12-01".into()),
            end_date: Some(" ".into()),
        };

        let filter = export_filter(&query).unwrap();

        assert_eq!(filter.city.as_deref(), Some("Recife"));
        assert_eq!(filter.start.map(|d| d.timestamp_millis()), Some(1_764_547_200_000));
        assert!(filter.end.is_none());

        let bad = ExportQuery { start_date: Some("xx".into()), ..Default::default() };
        assert!(matches!(export_filter(&bad), Err(AppError::ValidationError(_))));
    }
}
