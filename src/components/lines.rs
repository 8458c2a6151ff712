use super::cell::Cell;
use crate::game::{LineRound, SymbolTable};
use yew::prelude::*;

const DISPLAY_ROWS: usize = 3;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub round: Option<LineRound>,
    pub symbols: SymbolTable,
    pub cell_size: f64,
}

#[function_component(Lines)]
pub fn lines(props: &Props) -> Html {
    let Props {
        round,
        symbols,
        cell_size,
    } = props;
    let cell_size = *cell_size;
    let width = cell_size * 8.;

    let round = match round {
        Some(round) => round,
        None => {
            let height = cell_size * DISPLAY_ROWS as f64;
            return html! {
                <svg width={width.to_string()} height={height.to_string()} class="lines">
                    <text x={(width / 2.).to_string()} y={(height / 2.).to_string()} class="text-center" font-size={format!("{}px", cell_size * 0.4)}>
                        {"Press DIG! to start digging"}
                    </text>
                </svg>
            };
        }
    };

    let size = (width / round.length.max(1) as f64).min(cell_size * 1.5);
    let offset = (width - size * round.length as f64) / 2.;
    let height = size * round.rows.len() as f64;

    let rows = round.rows.iter().enumerate().map(|(row, symbols_in_row)| {
        let y = row as f64 * size;
        let highlight = if row == round.active_row {
            html! {
                <rect x="0" y={y.to_string()} width={width.to_string()} height={size.to_string()} class="active-line" />
            }
        } else {
            html! {}
        };
        let cells = symbols_in_row.iter().map(move |symbol| {
            html! {
                <Cell
                    symbol={*symbol}
                    label={symbols.label_of(symbol.kind).to_string()}
                    columns={round.length}
                    size={size}
                    offset_x={offset} />
            }
        });
        html! {
            <>
                {highlight}
                {for cells}
            </>
        }
    });

    html! {
        <svg width={width.to_string()} height={height.to_string()} class="lines">
            {for rows}
        </svg>
    }
}
