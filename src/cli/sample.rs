use chrono::{Datelike, Local, Months, NaiveDate};

use crate::error::{Result, TiliError};
use crate::layout::{self, Layout};

const SALARY_BASE: f64 = 2875.50;

/// Upper bound for --months; a century of synthetic history. Also keeps the
/// month arithmetic far inside NaiveDate's calendar range.
const MAX_MONTHS: u32 = 1200;

/// One spend template applied to a generated month.
struct MonthlySpend {
    day: u32,
    counterparty: &'static str,
    amount: f64,
}

/// Bills present in every month.
const FIXED: &[MonthlySpend] = &[
    MonthlySpend { day: 1, counterparty: "Asunto Oy Esimerkkikatu 8", amount: -850.00 },
    MonthlySpend { day: 2, counterparty: "HSL Helsingin Seudun Liikenne", amount: -64.70 },
    MonthlySpend { day: 6, counterparty: "DNA Oyj", amount: -29.90 },
    MonthlySpend { day: 8, counterparty: "If Vahinkovakuutus", amount: -42.35 },
];

/// One-off purchases; each month picks three based on its index.
const ROTATING: &[MonthlySpend] = &[
    MonthlySpend { day: 4, counterparty: "K-Market Keskusta", amount: -38.62 },
    MonthlySpend { day: 7, counterparty: "S-Market Herkku", amount: -54.13 },
    MonthlySpend { day: 9, counterparty: "Alepa Töölö", amount: -17.45 },
    MonthlySpend { day: 11, counterparty: "Lidl Kamppi", amount: -26.78 },
    MonthlySpend { day: 13, counterparty: "Ravintola Pikku Torilla", amount: -31.50 },
    MonthlySpend { day: 16, counterparty: "Kahvila Aalto", amount: -8.40 },
    MonthlySpend { day: 18, counterparty: "Yliopiston Apteekki", amount: -23.90 },
    MonthlySpend { day: 21, counterparty: "VR-Yhtymä", amount: -19.00 },
    MonthlySpend { day: 24, counterparty: "Clas Ohlson", amount: -45.95 },
    MonthlySpend { day: 27, counterparty: "Finnkino", amount: -14.50 },
];

pub fn run(months: u32, layout_name: &str) -> Result<()> {
    let text = generate(months, layout_name)?;
    println!("{text}");
    Ok(())
}

fn generate(months: u32, layout_name: &str) -> Result<String> {
    if months == 0 {
        return Err(TiliError::Other("--months must be at least 1".into()));
    }
    if months > MAX_MONTHS {
        return Err(TiliError::Other(format!(
            "--months must be at most {MAX_MONTHS}"
        )));
    }
    let Some(layout) = layout::by_name(layout_name) else {
        return Err(TiliError::Other(format!(
            "Unknown layout '{layout_name}' (expected nordea or op)"
        )));
    };
    Ok(generate_from(Local::now().date_naive(), months, layout))
}

/// Build a synthetic export ending at `today`'s month. Same inputs, same
/// output: the variation between months comes from index arithmetic, not
/// randomness, so tests and demos stay reproducible.
fn generate_from(today: NaiveDate, months: u32, layout: &Layout) -> String {
    let mut rows = vec![header(layout).to_string()];

    for i in 0..months {
        let months_ago = months - 1 - i;
        let target = today - Months::new(months_ago);
        let year = target.year();
        let month = target.month();
        let idx = i as usize;

        // salary mid-month, cycling through three pay grades
        let salary = ((SALARY_BASE + (idx % 3) as f64 * 11.17) * 100.0).round() / 100.0;
        rows.push(render_row(
            layout,
            &date_field(year, month, 15),
            &amount_field(salary),
            "Konsulttitoimisto Nord Oy",
            "Palkka",
        ));

        for bill in FIXED {
            rows.push(render_row(
                layout,
                &date_field(year, month, bill.day),
                &amount_field(bill.amount),
                bill.counterparty,
                "Korttiosto",
            ));
        }

        // three rotating purchases per month, picked by index
        for j in 0..3usize {
            let pick = (idx * 3 + j) % ROTATING.len();
            let spend = &ROTATING[pick];
            rows.push(render_row(
                layout,
                &date_field(year, month, spend.day),
                &amount_field(spend.amount),
                spend.counterparty,
                "Korttiosto",
            ));
        }

        // cash withdrawal with a blank payee on alternating months; nordea
        // exports name these only in the transaction-type column
        if idx % 2 == 1 {
            rows.push(render_row(
                layout,
                &date_field(year, month, 20),
                &amount_field(-40.00),
                "",
                "Otto",
            ));
        }

        if idx % 4 == 2 {
            rows.push(render_row(
                layout,
                &date_field(year, month, 26),
                &amount_field(120.00),
                "Verohallinto",
                "Pano",
            ));
        }

        rows.push(render_row(
            layout,
            &date_field(year, month, 31),
            &amount_field(-3.50),
            "Palvelumaksu",
            "Palvelumaksu",
        ));
    }

    rows.join(layout.row_delimiter)
}

fn header(layout: &Layout) -> &'static str {
    match layout.name {
        "op" => "Kirjauspäivä;Arvopäivä;Määrä EUROA;Laji;Selitys;Saaja/Maksaja;Saajan tilinumero;Viite;Viesti;Arkistointitunnus",
        _ => "Kirjauspäivä\tArvopäivä\tMaksupäivä\tMäärä\tSaaja/Maksaja\tTilinumero\tBIC\tTapahtuma\tViite\tKortinnumero",
    }
}

/// Lay one record out in the layout's own column order. The payee goes to
/// the primary counterparty column; the transaction type goes to the
/// fallback column when the layout has one.
fn render_row(layout: &Layout, date: &str, amount: &str, payee: &str, kind: &str) -> String {
    let width = layout
        .counterparty_columns
        .iter()
        .copied()
        .chain([layout.date_column, layout.amount_column])
        .max()
        .unwrap_or(0)
        + 1;
    let mut columns = vec![""; width];
    columns[layout.date_column] = date;
    columns[layout.amount_column] = amount;
    columns[layout.counterparty_columns[0]] = payee;
    if layout.counterparty_columns.len() > 1 {
        let fallback = layout.counterparty_columns[layout.counterparty_columns.len() - 1];
        columns[fallback] = kind;
    }
    columns.join(&layout.column_delimiter.to_string())
}

/// Clamp a day to the last valid day of the given year/month.
fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    let last_day = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap())
        .pred_opt()
        .unwrap()
        .day();
    day.min(last_day)
}

fn date_field(year: i32, month: u32, day: u32) -> String {
    let day = clamp_day(year, month, day);
    format!("{day}.{month}.{year}")
}

fn amount_field(value: f64) -> String {
    format!("{value:.2}").replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 7, 15).unwrap()
    }

    #[test]
    fn test_generate_is_deterministic() {
        let nordea = layout::by_name("nordea").unwrap();
        assert_eq!(
            generate_from(anchor(), 7, nordea),
            generate_from(anchor(), 7, nordea)
        );
    }

    #[test]
    fn test_generated_nordea_export_round_trips() {
        let nordea = layout::by_name("nordea").unwrap();
        let text = generate_from(anchor(), 7, nordea);
        let built = report::build(&text).unwrap();
        assert_eq!(built.layout, "nordea");
        let names: Vec<&str> = built.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["2016-01", "2016-02", "2016-03", "2016-04", "2016-05", "2016-06", "2016-07"]
        );
        let average = built.average.unwrap();
        assert_eq!(average.name, "AVERAGE from 2016-02 to 2016-06 (5 months)");
    }

    #[test]
    fn test_generated_op_export_round_trips() {
        let op = layout::by_name("op").unwrap();
        let text = generate_from(anchor(), 5, op);
        let built = report::build(&text).unwrap();
        assert_eq!(built.layout, "op");
        assert_eq!(built.sections.len(), 5);
        assert!(built.average.is_some());
    }

    #[test]
    fn test_blank_payee_withdrawals_use_the_type_column() {
        let nordea = layout::by_name("nordea").unwrap();
        let text = generate_from(anchor(), 4, nordea);
        let built = report::build(&text).unwrap();
        assert!(built.total.counts_by_counterparty.contains_key("otto"));
    }

    #[test]
    fn test_single_month_still_parses() {
        let nordea = layout::by_name("nordea").unwrap();
        let text = generate_from(anchor(), 1, nordea);
        let built = report::build(&text).unwrap();
        assert_eq!(built.sections.len(), 1);
        assert!(built.average.is_none());
    }

    #[test]
    fn test_generate_validates_arguments() {
        assert!(generate(0, "nordea").is_err());
        assert!(generate(3, "amex").is_err());
        assert!(generate(3, "op").is_ok());
    }

    #[test]
    fn test_generate_rejects_oversized_month_counts() {
        // far past NaiveDate's calendar range; must refuse, not panic
        assert!(generate(4_000_000, "nordea").is_err());
        assert!(generate(MAX_MONTHS + 1, "nordea").is_err());
        assert!(generate(MAX_MONTHS, "nordea").is_ok());
    }

    #[test]
    fn test_fee_day_clamps_to_month_end() {
        // February has no day 31; in 2016 the fee lands on the 29th
        let nordea = layout::by_name("nordea").unwrap();
        let text = generate_from(NaiveDate::from_ymd_opt(2016, 2, 10).unwrap(), 1, nordea);
        assert!(text.contains("29.2.2016"));
        assert!(report::build(&text).is_ok());
    }
}
