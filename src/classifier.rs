//! Reference classification: is an identifier occurrence a free value read?
//!
//! The decision is split in two. [`SyntacticContext::of`] reads the arena
//! and reduces the identifier's surroundings to a (parent kind, child slot)
//! pair; [`is_read_position`] is a pure function over that pair. Scope
//! membership is a separate lookup, [`is_bound`].

use autoimport_binder::{BinderState, ScopeId};
use autoimport_common::limits::MAX_PARENT_WALK_ITERATIONS;
use autoimport_parser::{NodeArena, NodeIndex, node_flags, syntax_kind_ext};
use autoimport_scanner::{SyntaxKind, is_assignment_operator};

/// The syntax directly around an identifier, after looking through
/// parentheses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentKind {
    ArrayLiteral { assignment_pattern: bool },
    ArrowFunction,
    /// `=` and compound assignments.
    Assignment { pattern_default: bool },
    /// The comma operator.
    Sequence,
    /// Any other binary or logical operator.
    Binary,
    Await,
    PrefixUnary { update: bool },
    PostfixUnary,
    Spread { assignment_pattern: bool },
    Call,
    New,
    Class,
    Conditional,
    Decorator,
    If,
    While,
    DoWhile,
    Switch,
    For,
    ForInOf,
    MemberAccess,
    PropertyAssignment { assignment_pattern: bool },
    ShorthandProperty,
    Return,
    Throw,
    TaggedTemplate,
    VariableDeclaration,
    ExpressionStatement,
    ExportDefault,
    Other,
}

/// Which child of the parent the identifier is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildSlot {
    Element,
    Body,
    Left,
    Right,
    Operand,
    Callee,
    Argument,
    Name,
    Heritage,
    Condition,
    WhenTrue,
    WhenFalse,
    Initializer,
    Incrementor,
    Expression,
    Object,
    Property,
    Tag,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntacticContext {
    pub parent: ParentKind,
    pub slot: ChildSlot,
}

impl SyntacticContext {
    pub const fn new(parent: ParentKind, slot: ChildSlot) -> SyntacticContext {
        SyntacticContext { parent, slot }
    }

    /// Describe where `ident` sits in the tree.
    pub fn of(arena: &NodeArena, ident: NodeIndex) -> SyntacticContext {
        let node = arena.skip_parenthesized_parents(ident);
        let parent_idx = arena.get_parent(node);
        let Some(parent) = arena.get(parent_idx) else {
            return SyntacticContext::new(ParentKind::Other, ChildSlot::Other);
        };

        let slot_of = |candidates: &[(NodeIndex, ChildSlot)]| {
            candidates
                .iter()
                .find(|(child, _)| *child == node)
                .map_or(ChildSlot::Other, |&(_, slot)| slot)
        };
        let other = SyntacticContext::new(ParentKind::Other, ChildSlot::Other);

        match parent.kind {
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION => SyntacticContext::new(
                ParentKind::ArrayLiteral {
                    assignment_pattern: parent.has_flag(node_flags::ASSIGNMENT_PATTERN),
                },
                ChildSlot::Element,
            ),
            syntax_kind_ext::ARROW_FUNCTION => {
                let Some(func) = arena.get_function(parent) else {
                    return other;
                };
                SyntacticContext::new(ParentKind::ArrowFunction, slot_of(&[(func.body, ChildSlot::Body)]))
            }
            syntax_kind_ext::BINARY_EXPRESSION => {
                let Some(binary) = arena.get_binary_expr(parent) else {
                    return other;
                };
                let slot = slot_of(&[(binary.left, ChildSlot::Left), (binary.right, ChildSlot::Right)]);
                let operator = SyntaxKind::try_from_u16(binary.operator_token);
                let kind = match operator {
                    Some(SyntaxKind::CommaToken) => ParentKind::Sequence,
                    Some(op) if is_assignment_operator(op) => ParentKind::Assignment {
                        pattern_default: is_pattern_default(arena, parent_idx),
                    },
                    _ => ParentKind::Binary,
                };
                SyntacticContext::new(kind, slot)
            }
            syntax_kind_ext::AWAIT_EXPRESSION => {
                SyntacticContext::new(ParentKind::Await, ChildSlot::Operand)
            }
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION => {
                let update = arena.get_unary_expr(parent).is_some_and(|unary| {
                    unary.operator == SyntaxKind::PlusPlusToken as u16
                        || unary.operator == SyntaxKind::MinusMinusToken as u16
                });
                SyntacticContext::new(ParentKind::PrefixUnary { update }, ChildSlot::Operand)
            }
            syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => {
                SyntacticContext::new(ParentKind::PostfixUnary, ChildSlot::Operand)
            }
            syntax_kind_ext::SPREAD_ELEMENT | syntax_kind_ext::SPREAD_ASSIGNMENT => {
                SyntacticContext::new(
                    ParentKind::Spread {
                        assignment_pattern: parent_is_assignment_pattern(arena, parent_idx),
                    },
                    ChildSlot::Operand,
                )
            }
            syntax_kind_ext::CALL_EXPRESSION | syntax_kind_ext::NEW_EXPRESSION => {
                let Some(call) = arena.get_call_expr(parent) else {
                    return other;
                };
                let slot = if call.expression == node {
                    ChildSlot::Callee
                } else if call.arguments.as_ref().is_some_and(|args| args.contains(node)) {
                    ChildSlot::Argument
                } else {
                    ChildSlot::Other
                };
                let kind = if parent.kind == syntax_kind_ext::NEW_EXPRESSION {
                    ParentKind::New
                } else {
                    ParentKind::Call
                };
                SyntacticContext::new(kind, slot)
            }
            syntax_kind_ext::CLASS_DECLARATION | syntax_kind_ext::CLASS_EXPRESSION => {
                let Some(class) = arena.get_class(parent) else {
                    return other;
                };
                SyntacticContext::new(
                    ParentKind::Class,
                    slot_of(&[(class.name, ChildSlot::Name), (class.heritage, ChildSlot::Heritage)]),
                )
            }
            syntax_kind_ext::CONDITIONAL_EXPRESSION => {
                let Some(cond) = arena.get_conditional_expr(parent) else {
                    return other;
                };
                SyntacticContext::new(
                    ParentKind::Conditional,
                    slot_of(&[
                        (cond.condition, ChildSlot::Condition),
                        (cond.when_true, ChildSlot::WhenTrue),
                        (cond.when_false, ChildSlot::WhenFalse),
                    ]),
                )
            }
            syntax_kind_ext::DECORATOR => {
                SyntacticContext::new(ParentKind::Decorator, ChildSlot::Expression)
            }
            syntax_kind_ext::IF_STATEMENT => {
                let Some(stmt) = arena.get_if_statement(parent) else {
                    return other;
                };
                SyntacticContext::new(ParentKind::If, slot_of(&[(stmt.expression, ChildSlot::Condition)]))
            }
            syntax_kind_ext::WHILE_STATEMENT
            | syntax_kind_ext::DO_STATEMENT
            | syntax_kind_ext::FOR_STATEMENT => {
                let Some(data) = arena.get_loop(parent) else {
                    return other;
                };
                let kind = match parent.kind {
                    syntax_kind_ext::WHILE_STATEMENT => ParentKind::While,
                    syntax_kind_ext::DO_STATEMENT => ParentKind::DoWhile,
                    _ => ParentKind::For,
                };
                SyntacticContext::new(
                    kind,
                    slot_of(&[
                        (data.initializer, ChildSlot::Initializer),
                        (data.condition, ChildSlot::Condition),
                        (data.incrementor, ChildSlot::Incrementor),
                        (data.statement, ChildSlot::Body),
                    ]),
                )
            }
            syntax_kind_ext::FOR_IN_STATEMENT | syntax_kind_ext::FOR_OF_STATEMENT => {
                let Some(data) = arena.get_for_in_of(parent) else {
                    return other;
                };
                SyntacticContext::new(
                    ParentKind::ForInOf,
                    slot_of(&[
                        (data.initializer, ChildSlot::Initializer),
                        (data.expression, ChildSlot::Expression),
                        (data.statement, ChildSlot::Body),
                    ]),
                )
            }
            syntax_kind_ext::SWITCH_STATEMENT => {
                let Some(data) = arena.get_switch(parent) else {
                    return other;
                };
                SyntacticContext::new(ParentKind::Switch, slot_of(&[(data.expression, ChildSlot::Condition)]))
            }
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
            | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => {
                let Some(access) = arena.get_access_expr(parent) else {
                    return other;
                };
                SyntacticContext::new(
                    ParentKind::MemberAccess,
                    slot_of(&[
                        (access.expression, ChildSlot::Object),
                        (access.name_or_argument, ChildSlot::Property),
                    ]),
                )
            }
            syntax_kind_ext::PROPERTY_ASSIGNMENT => {
                let Some(prop) = arena.get_property_assignment(parent) else {
                    return other;
                };
                SyntacticContext::new(
                    ParentKind::PropertyAssignment {
                        assignment_pattern: parent_is_assignment_pattern(arena, parent_idx),
                    },
                    slot_of(&[(prop.name, ChildSlot::Name), (prop.initializer, ChildSlot::Initializer)]),
                )
            }
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT => {
                let Some(prop) = arena.get_shorthand_property(parent) else {
                    return other;
                };
                SyntacticContext::new(
                    ParentKind::ShorthandProperty,
                    slot_of(&[
                        (prop.name, ChildSlot::Name),
                        (prop.object_assignment_initializer, ChildSlot::Initializer),
                    ]),
                )
            }
            syntax_kind_ext::RETURN_STATEMENT => {
                SyntacticContext::new(ParentKind::Return, ChildSlot::Expression)
            }
            syntax_kind_ext::THROW_STATEMENT => {
                SyntacticContext::new(ParentKind::Throw, ChildSlot::Expression)
            }
            syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION => {
                let Some(tagged) = arena.get_tagged_template(parent) else {
                    return other;
                };
                SyntacticContext::new(ParentKind::TaggedTemplate, slot_of(&[(tagged.tag, ChildSlot::Tag)]))
            }
            syntax_kind_ext::VARIABLE_DECLARATION => {
                let Some(decl) = arena.get_variable_declaration(parent) else {
                    return other;
                };
                SyntacticContext::new(
                    ParentKind::VariableDeclaration,
                    slot_of(&[(decl.name, ChildSlot::Name), (decl.initializer, ChildSlot::Initializer)]),
                )
            }
            syntax_kind_ext::EXPRESSION_STATEMENT => {
                SyntacticContext::new(ParentKind::ExpressionStatement, ChildSlot::Expression)
            }
            syntax_kind_ext::EXPORT_ASSIGNMENT => {
                SyntacticContext::new(ParentKind::ExportDefault, ChildSlot::Expression)
            }
            _ => other,
        }
    }
}

/// Whether an identifier in this context reads a value.
pub fn is_read_position(ctx: SyntacticContext) -> bool {
    use ChildSlot as S;
    use ParentKind as P;

    match (ctx.parent, ctx.slot) {
        (P::ArrayLiteral { assignment_pattern }, S::Element) => !assignment_pattern,
        (P::ArrowFunction, S::Body) => true,
        (P::Assignment { pattern_default }, S::Right) => !pattern_default,
        (P::Binary, S::Left | S::Right) => true,
        (P::Await, S::Operand) => true,
        (P::PrefixUnary { update }, S::Operand) => !update,
        (P::Spread { assignment_pattern }, S::Operand) => !assignment_pattern,
        (P::Call | P::New, S::Callee | S::Argument) => true,
        (P::Class, S::Heritage) => true,
        (P::Conditional, S::Condition | S::WhenTrue | S::WhenFalse) => true,
        (P::Decorator, S::Expression) => true,
        (P::If | P::While | P::DoWhile | P::Switch, S::Condition) => true,
        (P::For, S::Initializer | S::Condition | S::Incrementor) => true,
        (P::ForInOf, S::Expression) => true,
        (P::MemberAccess, S::Object) => true,
        (P::PropertyAssignment { assignment_pattern }, S::Initializer) => !assignment_pattern,
        (P::Return | P::Throw, S::Expression) => true,
        (P::TaggedTemplate, S::Tag) => true,
        (P::VariableDeclaration, S::Initializer) => true,
        (P::ExpressionStatement | P::ExportDefault, S::Expression) => true,
        _ => false,
    }
}

/// Whether `ident` is a candidate use: a read position outside any import
/// declaration.
pub fn is_qualifying_use(arena: &NodeArena, ident: NodeIndex) -> bool {
    is_read_position(SyntacticContext::of(arena, ident)) && !is_inside_import_declaration(arena, ident)
}

pub fn is_inside_import_declaration(arena: &NodeArena, node: NodeIndex) -> bool {
    let mut current = arena.get_parent(node);
    let mut iterations = 0usize;
    while let Some(ancestor) = arena.get(current) {
        if ancestor.kind == syntax_kind_ext::IMPORT_DECLARATION {
            return true;
        }
        if ancestor.kind == syntax_kind_ext::SOURCE_FILE || iterations >= MAX_PARENT_WALK_ITERATIONS {
            return false;
        }
        current = arena.get_parent(current);
        iterations += 1;
    }
    false
}

/// Whether `name` is declared in `scope` or any enclosing scope.
#[inline]
pub fn is_bound(binder: &BinderState, name: &str, scope: ScopeId) -> bool {
    binder.is_bound(name, scope)
}

/// The literal containing `element` is a destructuring assignment target.
fn parent_is_assignment_pattern(arena: &NodeArena, element: NodeIndex) -> bool {
    arena
        .get(arena.get_parent(element))
        .is_some_and(|literal| literal.has_flag(node_flags::ASSIGNMENT_PATTERN))
}

/// `target = default` written inside a destructuring assignment target,
/// directly or as a property value.
fn is_pattern_default(arena: &NodeArena, assignment: NodeIndex) -> bool {
    let parent = arena.get_parent(assignment);
    match arena.get(parent) {
        Some(node) if node.has_flag(node_flags::ASSIGNMENT_PATTERN) => true,
        Some(node) if node.kind == syntax_kind_ext::PROPERTY_ASSIGNMENT => {
            parent_is_assignment_pattern(arena, parent)
        }
        _ => false,
    }
}
