//! Table cell for amounts in reais, masked by "Ocultar valores".

use crate::shared::hide_values::MaskedValue;
use contracts::shared::number_format::format_brl;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TableCellMoney(
    #[prop(into)] value: Signal<Option<f64>>,
    /// Green for positive, red for negative
    #[prop(optional, default = false)]
    color_by_sign: bool,
    #[prop(optional, default = false)] bold: bool,
) -> impl IntoView {
    let formatted = Signal::derive(move || value.get().map(format_brl).unwrap_or_else(|| "—".into()));

    let cell_style = move || {
        let mut styles = Vec::new();
        if color_by_sign {
            match value.get() {
                Some(v) if v > 0.0 => styles.push("color: var(--color-success-700)"),
                Some(v) if v < 0.0 => styles.push("color: var(--color-error-700)"),
                _ => {}
            }
        }
        if bold {
            styles.push("font-weight: 600");
        }
        styles.join("; ")
    };

    view! {
        <TableCell class="text-right">
            <span style=cell_style>
                <MaskedValue value=formatted />
            </span>
        </TableCell>
    }
}
