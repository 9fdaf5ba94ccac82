/// The class model and registry types.
///
/// Declares the capability set shared by every carrier the engine can name:
/// classes (static types), values (runtime carriers), and the registries
/// that map class identities to constructors, operator rules, and comparator
/// rules.
///
/// # Responsibilities
/// - Defines the `Class` enum and the `ClassKey` identity used for registry
///   lookups.
/// - Defines the `Object` union over static and runtime carriers.
/// - Provides the `ConstructorMap`, `OperatorRules`, and `ComparatorRules`
///   registries.
pub mod class;
/// Coercion and operator dispatch.
///
/// The bridge between static classes and runtime values: constructing a
/// value of a target class from a source value, and applying operator or
/// comparator rules to operand pairs. Both passes of the engine funnel all
/// class/value questions through this module.
///
/// # Responsibilities
/// - `construct` / `should_construct` for runtime and static coercion.
/// - `operate` / `should_operate` for runtime and static dispatch.
/// - Structural construction for field-typed object classes.
pub mod dispatch;
/// Callable function values.
///
/// Defines the `Function` type shared by built-in methods (string `lower`
/// and `upper`, `Date.now`) and compiled function blocks, together with the
/// argument coercion applied on every call.
pub mod function;
/// Runtime values.
///
/// Declares the `Value` enum and its member access protocol. Every runtime
/// carrier the evaluator produces is a `Value` tagged with its class.
pub mod value;

mod primitives;
