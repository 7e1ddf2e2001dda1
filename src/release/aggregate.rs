//! Merges raw change declarations into one request per project

use crate::domain::{ChangeDeclaration, ChangeSet, Workspace};
use crate::error::ChangeError;
use tracing::debug;

/// Builds the explicit change set from declarations.
///
/// Declarations for the same project merge to the highest severity and all of
/// them are kept on the resulting request. A declaration for a project that is
/// not in the workspace is an error.
pub fn aggregate_changes(
    declarations: &[ChangeDeclaration],
    workspace: &Workspace,
) -> Result<ChangeSet, ChangeError> {
    let mut changes = ChangeSet::new();

    for declaration in declarations {
        let project = workspace
            .get(&declaration.package_name)
            .ok_or_else(|| ChangeError::unknown_project(&declaration.package_name))?;

        let raised = changes.merge(&project.name, declaration.change_type, &project.version)?;
        debug!(
            project = %project.name,
            change_type = %declaration.change_type,
            raised,
            "merged change declaration"
        );

        if let Some(request) = changes.get_mut(&project.name) {
            request.declarations.push(declaration.clone());
        }
    }

    Ok(changes)
}
