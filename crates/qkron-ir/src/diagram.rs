//! Plain-text circuit diagrams.

use crate::gate::StandardGate;
use crate::operation::Operation;

/// Render one line per qubit, one column per operation.
///
/// Targets are boxed (`[H]`), controls are drawn as `*` and both ends of a
/// SWAP as `x`.
pub fn render(qubit_count: usize, operations: &[Operation]) -> String {
    let label_width = qubit_count.saturating_sub(1).to_string().len();
    let mut rows: Vec<String> = (0..qubit_count)
        .map(|q| format!("q{q:<label_width$}: |0>-"))
        .collect();

    for op in operations {
        let boxed = format!("[{}]", op.name());
        let width = boxed.len() + 2;
        for (q, row) in rows.iter_mut().enumerate() {
            let cell = if q == op.target.index() {
                if op.gate.kind == StandardGate::Swap {
                    centered('x', width)
                } else {
                    format!("-{boxed}-")
                }
            } else if op.gate.swap_partner().is_some_and(|p| p.index() == q) {
                centered('x', width)
            } else if op.gate.controls().iter().any(|c| c.index() == q) {
                centered('*', width)
            } else {
                "-".repeat(width)
            };
            row.push_str(&cell);
        }
    }

    let mut out = rows.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn centered(mark: char, width: usize) -> String {
    let left = (width - 1) / 2;
    let right = width - 1 - left;
    format!("{}{mark}{}", "-".repeat(left), "-".repeat(right))
}
