//! Static label tables (EN/RU)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::types::Strategy;

/// Presentation language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Ru => write!(f, "ru"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    /// Accepts `en`, `ru` and region-tagged forms such as `ru-RU`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower.starts_with("ru") {
            Ok(Locale::Ru)
        } else if lower.starts_with("en") {
            Ok(Locale::En)
        } else {
            Err(format!("unsupported language: {}", s))
        }
    }
}

/// Label keys used by the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    ThExchange,
    ThAmountUnit,
    ThPriceUnit,
    ThDiffUnit,
    ThFeeUnit,
    Total,
    Pair,
    Spend,
    Receive,
    AvgPrice,
    TotalCost,
    TotalFees,
    Unspent,
    CurrentTime,
    RouteNote,
    EqualizeToggle,
    ResultsFor,
    ServerOk,
    ServerFail,
    ErrRequest,
    ErrParse,
    ErrBadAmount,
    ErrSameAssets,
    ErrMissingAsset,
}

impl Locale {
    /// Look up a static label
    pub fn label(&self, label: Label) -> &'static str {
        match self {
            Locale::En => en(label),
            Locale::Ru => ru(label),
        }
    }

    /// Short scenario title
    pub fn scenario_title(&self, strategy: Strategy) -> &'static str {
        match (self, strategy) {
            (Locale::En, Strategy::BestSingle) => "All funds to one exchange",
            (Locale::En, Strategy::EqualSplit) => "Even distribution",
            (Locale::En, Strategy::Optimal) => "Optimal distribution",
            (Locale::Ru, Strategy::BestSingle) => "Все средства на одну биржу",
            (Locale::Ru, Strategy::EqualSplit) => "Равномерное распределение средств",
            (Locale::Ru, Strategy::Optimal) => "Оптимальное распределение",
        }
    }

    /// One-line scenario explanation
    pub fn scenario_intro(&self, strategy: Strategy) -> &'static str {
        match (self, strategy) {
            (Locale::En, Strategy::BestSingle) => {
                "All funds go to the single exchange with the best price"
            }
            (Locale::En, Strategy::EqualSplit) => "Funds are split equally across all exchanges",
            (Locale::En, Strategy::Optimal) => "Funds are allocated optimally across exchanges",
            (Locale::Ru, Strategy::BestSingle) => "Все средства на одну биржу с лучшей ценой",
            (Locale::Ru, Strategy::EqualSplit) => "Средства поровну распределены по биржам",
            (Locale::Ru, Strategy::Optimal) => "Средства распределены оптимально по биржам",
        }
    }
}

fn en(label: Label) -> &'static str {
    match label {
        Label::ThExchange => "Exchange",
        Label::ThAmountUnit => "Amount ({unit})",
        Label::ThPriceUnit => "Price ({quote}/{base})",
        Label::ThDiffUnit => "Difference ({unit})",
        Label::ThFeeUnit => "Fee ({unit})",
        Label::Total => "Total",
        Label::Pair => "Pair",
        Label::Spend => "Spend",
        Label::Receive => "Receive",
        Label::AvgPrice => "Average execution price",
        Label::TotalCost => "Total to pay",
        Label::TotalFees => "Fees",
        Label::Unspent => "Unspent (order book depth limit)",
        Label::CurrentTime => "Current time",
        Label::RouteNote => {
            "Cross rate via {settlement}: {quote} is sold for {settlement}, then {base} is bought"
        }
        Label::EqualizeToggle => "Compare at equal quantity",
        Label::ResultsFor => "Results for pair",
        Label::ServerOk => "Server is up",
        Label::ServerFail => "Server is not responding",
        Label::ErrRequest => "Request failed",
        Label::ErrParse => "Malformed server response",
        Label::ErrBadAmount => "Enter a valid amount",
        Label::ErrSameAssets => "Buy and Pay must be different",
        Label::ErrMissingAsset => "Select both assets",
    }
}

fn ru(label: Label) -> &'static str {
    match label {
        Label::ThExchange => "Биржа",
        Label::ThAmountUnit => "Количество ({unit})",
        Label::ThPriceUnit => "Цена ({quote}/{base})",
        Label::ThDiffUnit => "Разница ({unit})",
        Label::ThFeeUnit => "Комиссия ({unit})",
        Label::Total => "Итого",
        Label::Pair => "Пара",
        Label::Spend => "Потратить",
        Label::Receive => "Получите",
        Label::AvgPrice => "Средняя цена исполнения",
        Label::TotalCost => "Итого к оплате",
        Label::TotalFees => "Комиссии",
        Label::Unspent => "Не израсходовано (ограничение глубины)",
        Label::CurrentTime => "Текущее время",
        Label::RouteNote => {
            "Кросс-курс через {settlement}: {quote} продаётся за {settlement}, затем покупается {base}"
        }
        Label::EqualizeToggle => "Сравнить при равном количестве",
        Label::ResultsFor => "Результаты для пары",
        Label::ServerOk => "Сервер работает",
        Label::ServerFail => "Сервер не отвечает",
        Label::ErrRequest => "Ошибка запроса",
        Label::ErrParse => "Некорректный ответ сервера",
        Label::ErrBadAmount => "Введите корректную сумму",
        Label::ErrSameAssets => "Монеты «Отдаёте» и «Получаете» должны различаться",
        Label::ErrMissingAsset => "Выберите обе монеты",
    }
}

/// Substitute `{name}` placeholders in a label template
pub fn fill(template: &str, params: &[(&str, &str)]) -> String {
    params.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{}}}", key), value)
    })
}
