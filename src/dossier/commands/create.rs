use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::registry::DossierRegistry;

pub fn run(registry: &mut DossierRegistry, name: &str) -> Result<CmdResult> {
    let id = registry.create(name)?;
    let dossier = registry.get(&id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Dossier created: {}",
        dossier.name()
    )));
    Ok(result.with_affected_ids(vec![id]))
}
