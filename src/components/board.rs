use super::cell::Cell;
use crate::game::{GridBoard, SymbolTable};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub board: GridBoard,
    pub last_revealed: Vec<usize>,
    pub symbols: SymbolTable,
    /// Width of one eighth of the view; the board fills eight of them.
    pub cell_size: f64,
}

#[function_component(Board)]
pub fn board(props: &Props) -> Html {
    let Props {
        board,
        last_revealed,
        symbols,
        cell_size,
    } = props;
    let size = cell_size * 8. / board.cols.max(1) as f64;
    let width = (size * board.cols as f64).to_string();
    let height = (size * board.rows as f64).to_string();

    let cells = board.cells.iter().map(|symbol| {
        html! {
            <Cell
                symbol={*symbol}
                label={symbols.label_of(symbol.kind).to_string()}
                columns={board.cols}
                size={size}
                fresh={last_revealed.contains(&symbol.id)} />
        }
    });

    html! {
        <svg width={width} height={height} class="board">
            {for cells}
        </svg>
    }
}
