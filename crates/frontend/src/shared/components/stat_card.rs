use crate::shared::hide_values::MaskedValue;
use crate::shared::icons::icon;
use contracts::domain::simulation::aggregate::IndicatorUnit;
use contracts::shared::number_format::{format_brl, format_decimal_br, format_int_br, format_percent_br};
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueFormat {
    Money,
    Integer,
    Decimal { decimals: u8 },
    /// Ratio rendered as a percentage (0.25 → "25,00%").
    Percent,
}

impl From<IndicatorUnit> for ValueFormat {
    fn from(unit: IndicatorUnit) -> Self {
        match unit {
            IndicatorUnit::Reais | IndicatorUnit::ReaisPorAluno => ValueFormat::Money,
            IndicatorUnit::Percentual => ValueFormat::Percent,
        }
    }
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Money => format_brl(value),
            ValueFormat::Integer => format_int_br(value),
            ValueFormat::Decimal { decimals } => format_decimal_br(value, *decimals),
            ValueFormat::Percent => format_percent_br(value),
        }
    }

    /// Only money is masked by "Ocultar valores".
    pub fn is_sensitive(&self) -> bool {
        matches!(self, ValueFormat::Money)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardStatus {
    Neutral,
    Good,
    Bad,
}

impl CardStatus {
    pub fn by_sign(value: f64) -> Self {
        if value > 0.0 {
            CardStatus::Good
        } else if value < 0.0 {
            CardStatus::Bad
        } else {
            CardStatus::Neutral
        }
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(optional, into)]
    icon_name: Option<String>,
    /// None while loading
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: ValueFormat,
    #[prop(into, optional)]
    status: Signal<Option<CardStatus>>,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let status_class = move || match status.get().unwrap_or(CardStatus::Neutral) {
        CardStatus::Good => "stat-card stat-card--success",
        CardStatus::Bad => "stat-card stat-card--error",
        CardStatus::Neutral => "stat-card",
    };

    let formatted = Signal::derive(move || match value.get() {
        Some(v) => format.format(v),
        None => "—".to_string(),
    });

    let value_view = if format.is_sensitive() {
        view! { <MaskedValue value=formatted /> }.into_any()
    } else {
        view! { <span>{move || formatted.get()}</span> }.into_any()
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class=status_class>
            {icon_name.map(|name| view! { <div class="stat-card__icon">{icon(&name)}</div> })}
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{value_view}</div>
                {subtitle_view}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_format_from_unit() {
        assert_eq!(ValueFormat::from(IndicatorUnit::ReaisPorAluno), ValueFormat::Money);
        assert_eq!(ValueFormat::from(IndicatorUnit::Percentual), ValueFormat::Percent);
        assert!(ValueFormat::Money.is_sensitive());
        assert!(!ValueFormat::Percent.is_sensitive());
    }

    #[test]
    fn test_card_status_by_sign() {
        assert_eq!(CardStatus::by_sign(10.0), CardStatus::Good);
        assert_eq!(CardStatus::by_sign(-0.5), CardStatus::Bad);
        assert_eq!(CardStatus::by_sign(0.0), CardStatus::Neutral);
    }
}
