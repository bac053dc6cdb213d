//! Then steps for endpoint registry BDD scenarios.

use super::world::{RegistryWorld, run_async};
use vault_relay::endpoint::{domain::EndpointName, services::EndpointRegistryError};
use rstest_bdd_macros::then;

#[then(r#"the active endpoint is "{name}""#)]
fn active_endpoint_is(world: &mut RegistryWorld, name: String) -> Result<(), eyre::Report> {
    let active = run_async(world.registry.get_active())
        .map_err(|err| eyre::eyre!("get_active failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("expected '{name}' to be active, but none is"))?;
    if active.name().as_str() != name {
        return Err(eyre::eyre!(
            "expected '{name}' to be active, found '{}'",
            active.name()
        ));
    }
    if !active.is_active() {
        return Err(eyre::eyre!("active endpoint '{name}' is not flagged active"));
    }
    Ok(())
}

#[then("no endpoint is active")]
fn no_endpoint_active(world: &mut RegistryWorld) -> Result<(), eyre::Report> {
    let active = run_async(world.registry.get_active())
        .map_err(|err| eyre::eyre!("get_active failed: {err}"))?;
    if let Some(config) = active {
        return Err(eyre::eyre!("expected no active endpoint, found '{}'", config.name()));
    }
    Ok(())
}

#[then(r#"the default endpoint is "{name}""#)]
fn default_endpoint_is(world: &mut RegistryWorld, name: String) -> Result<(), eyre::Report> {
    let store = run_async(world.registry.snapshot())
        .map_err(|err| eyre::eyre!("snapshot failed: {err}"))?;
    let default_name = store.default_name().map(EndpointName::as_str);
    if default_name != Some(name.as_str()) {
        return Err(eyre::eyre!("expected default '{name}', found {default_name:?}"));
    }
    Ok(())
}

#[then("no endpoint is the default")]
fn no_default_endpoint(world: &mut RegistryWorld) -> Result<(), eyre::Report> {
    let store = run_async(world.registry.snapshot())
        .map_err(|err| eyre::eyre!("snapshot failed: {err}"))?;
    if let Some(default_name) = store.default_name() {
        return Err(eyre::eyre!("expected no default, found '{default_name}'"));
    }
    Ok(())
}

#[then(r#"the listing shows "{name}" as inactive"#)]
fn listing_shows_inactive(world: &mut RegistryWorld, name: String) -> Result<(), eyre::Report> {
    let listing =
        run_async(world.registry.list()).map_err(|err| eyre::eyre!("list failed: {err}"))?;
    let entry = listing
        .iter()
        .find(|summary| summary.name == name)
        .ok_or_else(|| eyre::eyre!("'{name}' is not listed"))?;
    if entry.is_active {
        return Err(eyre::eyre!("expected '{name}' to be inactive"));
    }
    Ok(())
}

#[then("exactly one listed endpoint is active")]
fn exactly_one_active(world: &mut RegistryWorld) -> Result<(), eyre::Report> {
    let listing =
        run_async(world.registry.list()).map_err(|err| eyre::eyre!("list failed: {err}"))?;
    let active = listing.iter().filter(|summary| summary.is_active).count();
    if active != 1 {
        return Err(eyre::eyre!("expected one active endpoint, found {active}"));
    }
    Ok(())
}

#[then("adding fails because the endpoint already exists")]
fn adding_fails_as_duplicate(world: &RegistryWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_add_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing add result in scenario world"))?;
    if !matches!(result, Err(EndpointRegistryError::AlreadyExists(_))) {
        return Err(eyre::eyre!("expected already-exists error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the endpoint "{name}" still has credential "{credential}""#)]
fn endpoint_keeps_credential(
    world: &mut RegistryWorld,
    name: String,
    credential: String,
) -> Result<(), eyre::Report> {
    let config = run_async(world.registry.get(&name))
        .map_err(|err| eyre::eyre!("get failed: {err}"))?;
    if config.credential().expose() != credential {
        return Err(eyre::eyre!("credential of '{name}' changed"));
    }
    Ok(())
}
