use crate::prelude::*;
use crate::translation::line::INDENT;

/// The `{types}` section of `errors.erl`: every error type joined as a union.
pub fn error_types(groups: &[OdErrorGroup]) -> String {
    all_errors(groups)
        .map(|od_error| format!("{INDENT}{}:t()", od_error.type_name))
        .collect::<Vec<_>>()
        .join(" |\n")
}

/// The `{id_to_type_mapping}` section of `errors.erl`.
pub fn id_to_type_mapping(groups: &[OdErrorGroup]) -> String {
    all_errors(groups)
        .map(|od_error| {
            format!(
                "{INDENT}?{} => ?{}",
                od_error.id_macro(),
                od_error.type_macro()
            )
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

fn all_errors(groups: &[OdErrorGroup]) -> impl Iterator<Item = &OdError> {
    groups.iter().flat_map(|group| group.errors.iter())
}
