//! When steps for endpoint registry BDD scenarios.

use super::world::{RegistryWorld, build_request, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"a new active endpoint "{name}" with credential "{credential}" is added"#)]
fn add_and_activate(
    world: &mut RegistryWorld,
    name: String,
    credential: String,
) -> Result<(), eyre::Report> {
    run_async(
        world
            .registry
            .add(build_request(&name, &credential).make_active(true)),
    )
    .wrap_err("add active endpoint")?;
    Ok(())
}

#[when(r#"the endpoint "{name}" is added with credential "{credential}""#)]
fn add_endpoint(
    world: &mut RegistryWorld,
    name: String,
    credential: String,
) -> Result<(), eyre::Report> {
    run_async(world.registry.add(build_request(&name, &credential)))
        .wrap_err("add endpoint")?;
    Ok(())
}

#[when(r#"the endpoint "{name}" is added again with credential "{credential}""#)]
fn add_endpoint_again(world: &mut RegistryWorld, name: String, credential: String) {
    world.last_add_result = Some(run_async(
        world.registry.add(build_request(&name, &credential)),
    ));
}

#[when(r#"the endpoint "{name}" is made active"#)]
fn make_active(world: &mut RegistryWorld, name: String) -> Result<(), eyre::Report> {
    run_async(world.registry.set_active(&name)).wrap_err("activate endpoint")?;
    Ok(())
}

#[when(r#"the endpoint "{name}" is removed"#)]
fn remove_endpoint(world: &mut RegistryWorld, name: String) -> Result<(), eyre::Report> {
    run_async(world.registry.remove(&name)).wrap_err("remove endpoint")?;
    Ok(())
}

#[when("the registry is restarted")]
fn restart_registry(world: &mut RegistryWorld) {
    world.restart();
}
