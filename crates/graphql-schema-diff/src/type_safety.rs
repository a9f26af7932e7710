use graphql_type_graph::FieldType;

/// Whether clients reading a field of type `old` keep working when it becomes `new`. Output
/// types may only get stricter.
pub(crate) fn is_safe_output_change(old: &FieldType, new: &FieldType) -> bool {
    match (old, new) {
        (FieldType::List(old_inner), FieldType::List(new_inner)) => is_safe_output_change(old_inner, new_inner),
        (FieldType::List(_) | FieldType::Named(_), FieldType::NonNull(new_inner)) => {
            is_safe_output_change(old, new_inner)
        }
        (FieldType::NonNull(old_inner), FieldType::NonNull(new_inner)) => is_safe_output_change(old_inner, new_inner),
        (FieldType::Named(old_name), FieldType::Named(new_name)) => old_name == new_name,
        _ => false,
    }
}

/// Whether clients passing a value of type `old` keep working when the argument or input field
/// becomes `new`. Input types may only get looser.
pub(crate) fn is_safe_input_change(old: &FieldType, new: &FieldType) -> bool {
    match (old, new) {
        (FieldType::List(old_inner), FieldType::List(new_inner)) => is_safe_input_change(old_inner, new_inner),
        (FieldType::NonNull(old_inner), FieldType::NonNull(new_inner)) => is_safe_input_change(old_inner, new_inner),
        (FieldType::NonNull(old_inner), _) => is_safe_input_change(old_inner, new),
        (FieldType::Named(old_name), FieldType::Named(new_name)) => old_name == new_name,
        _ => false,
    }
}
