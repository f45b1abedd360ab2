//! Shared pieces for rendering server records.

use leptos::prelude::*;
use serde::Serialize;
use serde_json::Value;
use storeadmin_shared::Fields;

const MAX_COLUMNS: usize = 8;

/// Flattens any record into its JSON object form.
pub fn to_row<T: Serialize>(item: &T) -> Fields {
    match serde_json::to_value(item) {
        Ok(Value::Object(map)) => map,
        _ => Fields::new(),
    }
}

/// Column names in first-seen order across all rows. Nested objects and
/// arrays are skipped.
pub fn columns(rows: &[Fields]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in rows {
        for (key, value) in row {
            if names.len() == MAX_COLUMNS {
                return names;
            }
            if matches!(value, Value::Object(_) | Value::Array(_)) {
                continue;
            }
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
    }
    names
}

pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Loading spinner and last error of a store.
#[component]
pub fn StoreStatus(
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="flex justify-center py-4">
                <span class="loading loading-spinner loading-md text-primary"></span>
            </div>
        </Show>
        {move || {
            error
                .get()
                .map(|msg| {
                    view! {
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{msg}</span>
                        </div>
                    }
                })
        }}
    }
}

/// Read-only table over arbitrary records.
#[component]
pub fn RecordTable(#[prop(into)] rows: Signal<Vec<Fields>>) -> impl IntoView {
    let header = Memo::new(move |_| rows.with(|r| columns(r)));

    view! {
        <div class="overflow-x-auto w-full">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        {move || {
                            header.get().into_iter().map(|name| view! { <th>{name}</th> }).collect_view()
                        }}
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(|r| r.is_empty())>
                        <tr>
                            <td colspan="8" class="text-center py-8 text-base-content/50">
                                "Nothing to show."
                            </td>
                        </tr>
                    </Show>
                    {move || {
                        let names = header.get();
                        rows.get()
                            .into_iter()
                            .map(|row| {
                                let cells = names
                                    .iter()
                                    .map(|name| view! { <td>{cell_text(row.get(name))}</td> })
                                    .collect_view();
                                view! { <tr>{cells}</tr> }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => Fields::new(),
        }
    }

    #[test]
    fn columns_are_unioned_in_first_seen_order() {
        let rows = vec![
            row(json!({"walletId": 1, "balance": 10})),
            row(json!({"walletId": 2, "owner": "ada", "history": []})),
        ];
        let names = columns(&rows);
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"owner".to_string()));
        assert!(!names.contains(&"history".to_string()));
    }

    #[test]
    fn cells_render_strings_bare() {
        assert_eq!(cell_text(Some(&json!("Books"))), "Books");
        assert_eq!(cell_text(Some(&json!(3.5))), "3.5");
        assert_eq!(cell_text(Some(&Value::Null)), "-");
        assert_eq!(cell_text(None), "-");
    }
}
