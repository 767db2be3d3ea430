use eyre::Result;
use utoipa::OpenApi;

use clipcheck::openapi::ApiDoc;

/// `post_analyze` -> `postAnalyze`
fn operation_id_to_camel_case(operation_id: &str) -> String {
    let mut parts = operation_id.split('_').filter(|part| !part.is_empty());
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts
        .map(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .map(|c| c.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        })
        .collect::<String>();
    first + &rest
}

fn main() -> Result<()> {
    let mut api = ApiDoc::openapi();
    for path_item in api.paths.paths.values_mut() {
        for operation in path_item.operations.values_mut() {
            if let Some(operation_id) = operation.operation_id.as_mut() {
                *operation_id = operation_id_to_camel_case(operation_id);
            }
        }
    }
    println!("{}", api.to_pretty_json()?);
    Ok(())
}

#[test]
fn operation_ids_become_camel_case() {
    assert_eq!(operation_id_to_camel_case("post_analyze"), "postAnalyze");
    assert_eq!(operation_id_to_camel_case("analyze"), "analyze");
    assert_eq!(operation_id_to_camel_case("get__report_"), "getReport");
}
