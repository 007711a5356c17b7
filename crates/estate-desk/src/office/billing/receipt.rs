//! Printable receipt for a recorded payment. The endpoint serves this as a
//! plain HTML document the cashier prints straight from the browser.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::domain::PaymentMethod;

/// Everything stamped onto one receipt.
#[derive(Debug, Clone)]
pub struct ReceiptContext {
    pub org_name: String,
    pub footer: String,
    pub receipt_no: String,
    pub payer_name: String,
    pub contract_id: String,
    pub period: String,
    pub description: String,
    pub amount: i64,
    pub method: PaymentMethod,
    pub reference_no: Option<String>,
    pub paid_at: DateTime<Utc>,
    pub received_by: String,
}

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const GROUPS: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

fn under_hundred(n: u16) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    let tens = TENS[(n / 10) as usize];
    let unit = n % 10;
    if unit == 0 {
        tens.to_string()
    } else {
        format!("{tens}-{}", ONES[unit as usize])
    }
}

fn under_thousand(n: u16) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    let mut words = String::new();
    if hundreds > 0 {
        words.push_str(ONES[hundreds as usize]);
        words.push_str(" hundred");
    }
    if rest > 0 {
        if !words.is_empty() {
            words.push(' ');
        }
        words.push_str(&under_hundred(rest));
    }
    words
}

/// Spell a peso amount for the receipt body. The office bills in whole
/// pesos within 0..=999,999,999; anything non-positive reads as zero.
pub fn amount_in_words(amount: i64) -> String {
    if amount <= 0 {
        return "zero".to_string();
    }

    let mut remaining = amount as u64;
    let mut spelled: Vec<String> = Vec::new();
    let mut group = 0usize;
    while remaining > 0 && group < GROUPS.len() {
        let chunk = (remaining % 1000) as u16;
        if chunk > 0 {
            let mut part = under_thousand(chunk);
            if !GROUPS[group].is_empty() {
                part.push(' ');
                part.push_str(GROUPS[group]);
            }
            spelled.push(part);
        }
        remaining /= 1000;
        group += 1;
    }

    spelled.reverse();
    spelled.join(" ")
}

/// Thousands-separated figure for the printed amount line.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn capitalize(words: &str) -> String {
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Render the receipt as a standalone printable HTML document.
pub fn render_receipt_html(context: &ReceiptContext) -> String {
    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>").expect("write doctype");
    writeln!(html, "<html lang=\"en\"><head><meta charset=\"utf-8\">").expect("write head");
    writeln!(
        html,
        "<title>Official Receipt {}</title>",
        escape_html(&context.receipt_no)
    )
    .expect("write title");
    writeln!(
        html,
        "<style>body{{font-family:Georgia,serif;margin:2rem auto;max-width:640px;color:#222}}\
h1{{margin:0;font-size:1.4rem;text-align:center}}\
.muted{{text-align:center;color:#666;margin-top:0.2rem}}\
table{{width:100%;border-collapse:collapse;margin-top:1.5rem}}\
td{{padding:0.45rem 0.2rem;border-bottom:1px solid #ddd;vertical-align:top}}\
td.label{{width:38%;color:#555}}\
.amount{{font-size:1.2rem;font-weight:bold}}\
.footer{{margin-top:2rem;text-align:center;color:#777;font-size:0.85rem}}\
@media print{{body{{margin:0.5in}}}}</style>"
    )
    .expect("write style");
    writeln!(html, "</head><body>").expect("write body open");

    writeln!(html, "<h1>{}</h1>", escape_html(&context.org_name)).expect("write org");
    writeln!(html, "<p class=\"muted\">Official Receipt</p>").expect("write subtitle");

    writeln!(html, "<table>").expect("write table open");
    receipt_row(&mut html, "Receipt No.", &context.receipt_no);
    receipt_row(
        &mut html,
        "Date",
        &context.paid_at.format("%B %d, %Y").to_string(),
    );
    receipt_row(&mut html, "Received From", &context.payer_name);
    receipt_row(&mut html, "Contract", &context.contract_id);
    receipt_row(&mut html, "Billing Period", &context.period);
    receipt_row(&mut html, "Particulars", &context.description);
    writeln!(
        html,
        "<tr><td class=\"label\">Amount</td><td class=\"amount\">PHP {}</td></tr>",
        format_amount(context.amount)
    )
    .expect("write amount");
    receipt_row(
        &mut html,
        "Amount in Words",
        &format!("{} pesos only", capitalize(&amount_in_words(context.amount))),
    );
    receipt_row(&mut html, "Payment Method", context.method.display_name());
    if let Some(reference) = &context.reference_no {
        receipt_row(&mut html, "Reference No.", reference);
    }
    receipt_row(&mut html, "Received By", &context.received_by);
    writeln!(html, "</table>").expect("write table close");

    writeln!(
        html,
        "<p class=\"footer\">{}</p>",
        escape_html(&context.footer)
    )
    .expect("write footer");
    writeln!(html, "</body></html>").expect("write body close");

    html
}

fn receipt_row(html: &mut String, label: &str, value: &str) {
    writeln!(
        html,
        "<tr><td class=\"label\">{}</td><td>{}</td></tr>",
        escape_html(label),
        escape_html(value)
    )
    .expect("write row");
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
