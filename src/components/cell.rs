use crate::game::{Position, Symbol, SymbolKind};
use yew::prelude::*;

fn glyph(kind: SymbolKind) -> &'static str {
    match kind {
        SymbolKind::Gem => "💎",
        SymbolKind::Treasure => "💰",
        SymbolKind::Skull => "💀",
        SymbolKind::Bomb => "💣",
        SymbolKind::Coins => "🪙",
        SymbolKind::Scroll => "📜",
    }
}

/// Top-left corner of a symbol's slot, in cells.
fn slot(position: Position, columns: usize) -> (f64, f64) {
    match position {
        Position::Cell(index) => ((index % columns) as f64, (index / columns) as f64),
        Position::Line { row, col } => (col as f64, row as f64),
    }
}

#[derive(Clone, Properties, PartialEq)]
pub struct Props {
    pub symbol: Symbol,
    pub label: String,
    /// Grid width, used to place `Position::Cell` symbols.
    pub columns: usize,
    pub size: f64,
    #[prop_or_default]
    pub offset_x: f64,
    /// Revealed by the latest dig.
    #[prop_or_default]
    pub fresh: bool,
}

#[function_component(Cell)]
pub fn cell(props: &Props) -> Html {
    let Props {
        symbol,
        label,
        columns,
        size,
        offset_x,
        fresh,
    } = props.clone();
    let (col, row) = slot(symbol.position, columns.max(1));
    let x = offset_x + col * size;
    let y = row * size;
    let cx = (x + size / 2.).to_string();
    let glyph_y = (y + size * 0.45).to_string();
    let class = match (symbol.revealed, fresh) {
        (false, _) => "stroke hidden",
        (true, false) => "stroke",
        (true, true) => "stroke fresh",
    };

    html! {
        <g>
            <rect
                x={(x + size * 0.05).to_string()}
                y={(y + size * 0.05).to_string()}
                width={(size * 0.9).to_string()}
                height={(size * 0.9).to_string()}
                class={class} />
            if symbol.revealed {
                <text x={cx.clone()} y={glyph_y} font-size={format!("{}px", size * 0.45)} dominant-baseline="middle" text-anchor="middle">
                    <title>{label}</title>
                    {glyph(symbol.kind)}
                </text>
                <text x={cx} y={(y + size * 0.85).to_string()} font-size={format!("{}px", size * 0.2)} class="fill" text-anchor="middle">
                    {format!("{:+}", symbol.points)}
                </text>
            } else {
                <text x={cx} y={glyph_y} font-size={format!("{}px", size * 0.4)} dominant-baseline="middle" text-anchor="middle">
                    {"⛏"}
                </text>
            }
        </g>
    }
}
