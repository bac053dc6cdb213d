//! Given steps for endpoint registry BDD scenarios.

use super::world::{RegistryWorld, build_request, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an empty endpoint registry")]
fn an_empty_registry(world: &mut RegistryWorld) -> Result<(), eyre::Report> {
    let listing = run_async(world.registry.list()).wrap_err("list endpoints")?;
    if !listing.is_empty() {
        return Err(eyre::eyre!("expected an empty registry, found {listing:?}"));
    }
    Ok(())
}

#[given(r#"a registered endpoint "{name}" with credential "{credential}""#)]
fn a_registered_endpoint(
    world: &mut RegistryWorld,
    name: String,
    credential: String,
) -> Result<(), eyre::Report> {
    run_async(world.registry.add(build_request(&name, &credential)))
        .wrap_err("register endpoint for scenario")?;
    Ok(())
}
