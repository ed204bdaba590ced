use serde::Serialize;

// The type name without module path and generic arguments, e.g. `Invoice` for
// `billing::model::Invoice<Eur>`
pub(crate) fn short_type_name<M: ?Sized>() -> &'static str {
    let full = std::any::type_name::<M>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .trim_start_matches('&')
}

// The fields of the model as JSON object, in declaration order,
// or "None" for models that are no JSON objects
pub(crate) fn render_fields<M: Serialize + ?Sized>(model: &M) -> String {
    match serde_json::to_value(model) {
        Ok(value) if value.is_object() => {
            serde_json::to_string(model).unwrap_or_else(|_| "None".to_string())
        }
        _ => "None".to_string(),
    }
}

pub(crate) fn describe<M: Serialize + ?Sized>(
    model: &M,
    method: &str,
    user: Option<&str>,
    add_info: Option<&str>,
) -> String {
    let type_name = short_type_name::<M>();
    let fields = render_fields(model);
    let mut text = match user.filter(|user| !user.is_empty()) {
        Some(user) => format!("{user} {method} {type_name} with {fields}."),
        None => format!("{type_name} with {fields} was {method}."),
    };
    if let Some(add_info) = add_info.filter(|add_info| !add_info.is_empty()) {
        text.push(' ');
        text.push_str(add_info);
    }
    text
}
