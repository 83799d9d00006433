//! The public operations.

use tygen_ast::{ArgSpec, MapArgField};
use tygen_checker::{CheckConfig, SpecReport};
use tygen_common::{Atom, Error, GeneratorHandle, ValidatorHandle};
use tygen_registry::Registry;
use tygen_solver::rewrite_args;

/// Builds a generator for `module.name` instantiated at `args`.
///
/// Opaque arguments may be generator-only here; a validator half is not
/// required because none is built.
pub fn from_type(
    reg: &Registry,
    module: Atom,
    name: Atom,
    args: &[ArgSpec],
) -> Result<GeneratorHandle, Error> {
    tracing::debug!("building generator for {}.{}/{}", module, name, args.len());
    let nodes = rewrite_args(args)?;
    tygen_gen::generator_for(reg, module, name, nodes)
}

/// Builds a membership validator for `module.name` instantiated at `args`.
pub fn validator_for_type(
    reg: &Registry,
    module: Atom,
    name: Atom,
    args: &[ArgSpec],
) -> Result<ValidatorHandle, Error> {
    let nodes = rewrite_args(args)?;
    tygen_valid::validator_for(reg, module, name, nodes)
}

/// Builds the generator/validator pair in one call.
///
/// Opaque arguments must pair a generator with a validator: a lone half
/// cannot serve both builds, and a generator never implies its validator.
/// Mixed usage is refused before anything is built.
pub fn from_type_with_validator(
    reg: &Registry,
    module: Atom,
    name: Atom,
    args: &[ArgSpec],
) -> Result<(GeneratorHandle, ValidatorHandle), Error> {
    if let Some(offender) = args.iter().find(|arg| has_lone_opaque(arg)) {
        return Err(Error::bad_argument(format!(
            "{offender:?} supplies only half of a generator/validator pair"
        )));
    }
    let nodes = rewrite_args(args)?;
    let generator = tygen_gen::generator_for(reg, module, name, nodes.clone())?;
    let validator = tygen_valid::validator_for(reg, module, name, nodes)?;
    Ok((generator, validator))
}

/// Spec-checks every overload of `module.name/arity` with defaults.
pub fn validate(reg: &Registry, module: Atom, name: Atom, arity: u32) -> Result<SpecReport, Error> {
    tracing::debug!("spec-checking {}.{}/{}", module, name, arity);
    tygen_checker::check_spec(reg, module, name, arity)
}

/// Spec-checks with explicit campaign settings.
pub fn validate_with(
    reg: &Registry,
    module: Atom,
    name: Atom,
    arity: u32,
    config: &CheckConfig,
) -> Result<SpecReport, Error> {
    tygen_checker::check_spec_with(reg, module, name, arity, config)
}

fn has_lone_opaque(arg: &ArgSpec) -> bool {
    match arg {
        ArgSpec::Generator(_) | ArgSpec::Validator(_) => true,
        ArgSpec::Container(_, subargs) | ArgSpec::UserType(_, subargs) => {
            subargs.iter().any(has_lone_opaque)
        }
        ArgSpec::RemoteType(_, _, subargs) => subargs.iter().any(has_lone_opaque),
        ArgSpec::MapArg(fields) => fields.iter().any(|field| match field {
            MapArgField::Required(k, v) | MapArgField::Optional(k, v) => {
                has_lone_opaque(k) || has_lone_opaque(v)
            }
        }),
        ArgSpec::Builtin(_) | ArgSpec::Literal(_) | ArgSpec::Pair(_, _) => false,
    }
}
