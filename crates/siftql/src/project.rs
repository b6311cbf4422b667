use crate::{error::CompileError, qualify::Qualifier, value::Value};

///
/// Attribute projection
///
/// Expands a requested output-column list into qualified, aliased
/// projection expressions. Field names are not checked against any
/// schema; unknown columns pass through.
///

/// Project requested attributes for a table.
///
/// Every element must be a string; an empty request projects `*`.
/// Output order matches input order.
pub fn project(
    qualifier: &Qualifier,
    attributes: &[Value],
    table: &str,
) -> Result<Vec<String>, CompileError> {
    let mut projections = Vec::with_capacity(attributes.len());

    for (index, attribute) in attributes.iter().enumerate() {
        let name = attribute
            .as_text()
            .ok_or(CompileError::NonStringAttribute { index })?;

        projections.push(qualifier.project_as(table, name));
    }

    if projections.is_empty() {
        projections.push("*".to_string());
    }

    Ok(projections)
}
