#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const MEMBER: &str = "メンバー";
    pub const PAID: &str = "支払額";
    pub const SHARE: &str = "負担額";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const ITEM: &str = "項目";
    pub const VALUE: &str = "値";
    pub const BILL_WITH_TIP: &str = "チップ込み合計";
    pub const SHARE_PER_PERSON: &str = "一人あたり";
    pub const ALL_SETTLED: &str = "精算の必要はありません";
    pub const PERIOD: &str = "回";
    pub const YEAR: &str = "年";
    pub const PRINCIPAL: &str = "元金";
    pub const INTEREST: &str = "利息";
    pub const PAYMENT: &str = "返済額";
    pub const REMAINING: &str = "残高";
    pub const MONTHLY_PAYMENT: &str = "毎月の返済額";
    pub const TOTAL_INTEREST: &str = "利息合計";
    pub const TOTAL_PAYMENT: &str = "返済総額";
    pub const EMPTY_SHEET: &str = "シートに計算できる内容がありません";
    pub const SETTLEMENT_CALCULATION_FAILED: &str = "清算の計算に失敗しました";
    pub const AMORTIZATION_CALCULATION_FAILED: &str = "返済計画の計算に失敗しました";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const PAID: &str = "Paid";
    pub const SHARE: &str = "Share";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const ITEM: &str = "Item";
    pub const VALUE: &str = "Value";
    pub const BILL_WITH_TIP: &str = "Bill with tip";
    pub const SHARE_PER_PERSON: &str = "Share per person";
    pub const ALL_SETTLED: &str = "Everyone is settled";
    pub const PERIOD: &str = "Period";
    pub const YEAR: &str = "Year";
    pub const PRINCIPAL: &str = "Principal";
    pub const INTEREST: &str = "Interest";
    pub const PAYMENT: &str = "Payment";
    pub const REMAINING: &str = "Remaining";
    pub const MONTHLY_PAYMENT: &str = "Monthly payment";
    pub const TOTAL_INTEREST: &str = "Total interest";
    pub const TOTAL_PAYMENT: &str = "Total payment";
    pub const EMPTY_SHEET: &str = "The sheet has nothing to calculate";
    pub const SETTLEMENT_CALCULATION_FAILED: &str = "Settlement calculation failed";
    pub const AMORTIZATION_CALCULATION_FAILED: &str = "Amortization calculation failed";
}

pub use strings::*;

use std::fmt::Display;

#[cfg(feature = "ja")]
pub fn missing_statement(keyword: impl Display) -> String {
    format!("`{keyword}` の行がありません")
}

#[cfg(feature = "ja")]
pub fn duplicate_statement(keyword: impl Display, line: usize) -> String {
    format!("`{keyword}` が重複しています (行 {line})")
}

#[cfg(feature = "ja")]
pub fn payment_mismatch(total_paid: impl Display, expected_total: impl Display) -> String {
    format!("支払額の合計 {total_paid} がチップ込みの合計 {expected_total} と一致しません")
}

#[cfg(feature = "ja")]
pub fn invalid_input(field: impl Display, reason: impl Display) -> String {
    format!("{field} が不正です: {reason}")
}


#[cfg(not(feature = "ja"))]
pub fn missing_statement(keyword: impl Display) -> String {
    format!("Missing `{keyword}` line")
}

#[cfg(not(feature = "ja"))]
pub fn duplicate_statement(keyword: impl Display, line: usize) -> String {
    format!("Duplicate `{keyword}` at line {line}")
}

#[cfg(not(feature = "ja"))]
pub fn payment_mismatch(total_paid: impl Display, expected_total: impl Display) -> String {
    format!("Total paid {total_paid} does not match the bill with tip {expected_total}")
}

#[cfg(not(feature = "ja"))]
pub fn invalid_input(field: impl Display, reason: impl Display) -> String {
    format!("Invalid {field}: {reason}")
}


pub struct SyntaxErrorMessage {
    line: usize,
    detail: String,
}

pub struct InvalidValueMessage {
    line: usize,
    detail: String,
}

pub fn syntax_error(line: usize, detail: String) -> SyntaxErrorMessage {
    SyntaxErrorMessage { line, detail }
}

pub fn invalid_value(line: usize, detail: String) -> InvalidValueMessage {
    InvalidValueMessage { line, detail }
}

#[cfg(feature = "ja")]
impl Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "構文エラー (行 {}): {}", self.line, self.detail)
    }
}

#[cfg(feature = "ja")]
impl Display for InvalidValueMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "値が不正です (行 {}): {}", self.line, self.detail)
    }
}

#[cfg(not(feature = "ja"))]
impl Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at line {}: {}", self.line, self.detail)
    }
}

#[cfg(not(feature = "ja"))]
impl Display for InvalidValueMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid value at line {}: {}", self.line, self.detail)
    }
}
