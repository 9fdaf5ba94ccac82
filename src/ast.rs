/// A source position attached to every AST node.
///
/// Positions are produced by the parser and carried through the engine so
/// that every diagnostic can point back at the statement or expression that
/// caused it. Diagnostics render positions as `line:column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 1-based source line.
    pub line:   usize,
    /// 1-based source column.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and column pair.
    ///
    /// ## Example
    /// ```
    /// use lingua::ast::Position;
    ///
    /// let position = Position::new(3, 14);
    /// assert_eq!(position.to_string(), "3:14");
    /// ```
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents an operator token.
///
/// The engine pattern-matches on these tokens when resolving assignments,
/// binary expressions, and switch case comparisons. Assignment-effect
/// operators (`+=`, `++`, ...) are reduced to their arithmetic counterpart
/// via [`Operator::effect`] before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Plain assignment (`=`)
    Assign,
    /// Additive assignment (`+=`)
    AddAssign,
    /// Subtractive assignment (`-=`)
    SubAssign,
    /// Multiplicative assignment (`*=`)
    MulAssign,
    /// Exponentiative assignment (`**=`)
    PwrAssign,
    /// Divisive assignment (`/=`)
    QuoAssign,
    /// Remainder assignment (`%=`)
    RemAssign,
    /// Increment (`++`)
    Inc,
    /// Decrement (`--`)
    Dec,
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Exponentiation (`**`)
    Pwr,
    /// Division (`/`)
    Quo,
    /// Remainder (`%`)
    Rem,
    /// Equality (`==`)
    Equals,
    /// Inequality (`!=`)
    NotEquals,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical conjunction (`&&`)
    And,
    /// Logical disjunction (`||`)
    Or,
}

impl Operator {
    /// Reduces an assignment-effect operator to the arithmetic operator it
    /// applies. Operators without an effect mapping are returned unchanged.
    ///
    /// ## Example
    /// ```
    /// use lingua::ast::Operator;
    ///
    /// assert_eq!(Operator::AddAssign.effect(), Operator::Add);
    /// assert_eq!(Operator::Inc.effect(), Operator::Add);
    /// assert_eq!(Operator::Mul.effect(), Operator::Mul);
    /// ```
    #[must_use]
    pub const fn effect(self) -> Self {
        match self {
            Self::AddAssign | Self::Inc => Self::Add,
            Self::SubAssign | Self::Dec => Self::Sub,
            Self::MulAssign => Self::Mul,
            Self::PwrAssign => Self::Pwr,
            Self::QuoAssign => Self::Quo,
            Self::RemAssign => Self::Rem,
            other => other,
        }
    }

    /// Returns `true` for comparison operators, which dispatch through
    /// comparator rules and produce Boolean values.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Equals
                 | Self::NotEquals
                 | Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::And
                 | Self::Or)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::PwrAssign => "**=",
            Self::QuoAssign => "/=",
            Self::RemAssign => "%=",
            Self::Inc => "++",
            Self::Dec => "--",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Pwr => "**",
            Self::Quo => "/",
            Self::Rem => "%",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
        };
        write!(f, "{token}")
    }
}

/// Represents a literal value embedded in the source.
///
/// Integer-shaped numerals carry an `i64` and belong to the Integer class;
/// decimal numerals carry an `f64` and belong to the Number class.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// The nil literal.
    Nil,
    /// A boolean literal: `true` or `false`.
    Boolean(bool),
    /// A string literal.
    String(String),
    /// An integer literal.
    Integer(i64),
    /// A decimal literal.
    Number(f64),
}

/// A dotted member path such as `a.b.c`.
///
/// The head resolves through the symbol table; every further member is
/// looked up on the object the previous step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// The member names in source order. Never empty.
    pub members:  Vec<String>,
    /// Line number in the source code.
    pub position: Position,
}

impl Selector {
    /// Builds a selector from a sequence of member names.
    pub fn new<S: Into<String>>(members: impl IntoIterator<Item = S>, position: Position) -> Self {
        Self { members: members.into_iter().map(Into::into).collect(),
               position }
    }
}

/// A call expression such as `Double(x)`, `value.lower()` or `Date.now()`.
///
/// When the target resolves to a class the call is a constructor
/// application; when it resolves to a function value the call invokes it.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// The expression being called.
    pub target:    Box<Expression>,
    /// The argument expressions in source order.
    pub arguments: Vec<Expression>,
    /// Line number in the source code.
    pub position:  Position,
}

/// An AST node representing an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal value.
    Literal {
        /// The constant value.
        value:    Literal,
        /// Line number in the source code.
        position: Position,
    },
    /// A dotted member path resolved through the symbol table.
    Selector(Selector),
    /// A constructor application or function invocation.
    Call(CallExpression),
    /// A binary operation between two expressions.
    Binary {
        /// Left operand.
        left:     Box<Expression>,
        /// The operator token.
        operator: Operator,
        /// Right operand.
        right:    Box<Expression>,
        /// Line number in the source code.
        position: Position,
    },
    /// A function literal; compiles to a callable function value.
    FunctionLiteral(Box<FunctionBlock>),
}

impl Expression {
    /// Gets the source position from `self`.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Literal { position, .. } | Self::Binary { position, .. } => *position,
            Self::Selector(selector) => selector.position,
            Self::Call(call) => call.position,
            Self::FunctionLiteral(block) => block.position,
        }
    }
}

/// A sequence of statements evaluated in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
    /// Line number in the source code.
    pub position:   Position,
}

/// An AST node representing a statement inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its effects.
    Expression(Expression),
    /// A variable declaration.
    Declaration(DeclarationStatement),
    /// An assignment to a selector target.
    Assignment(AssignmentExpression),
    /// A conditional statement with optional alternates.
    If(IfStatement),
    /// A pre-checked loop.
    While(WhileStatement),
    /// A counted or range-based loop.
    For(ForStatement),
    /// A multi-way comparison block.
    Switch(SwitchBlock),
    /// A receiver precondition check.
    Guard(GuardStatement),
    /// Returns a value from the enclosing block.
    Return(ReturnStatement),
    /// Raises an error value.
    Throw(ThrowStatement),
    /// Skips to the next loop iteration. Only legal directly inside a loop
    /// body.
    Continue {
        /// Line number in the source code.
        position: Position,
    },
    /// Exits the enclosing loop. Only legal directly inside a loop body.
    Break {
        /// Line number in the source code.
        position: Position,
    },
}

impl Statement {
    /// Gets the source position from `self`.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Expression(expression) => expression.position(),
            Self::Declaration(statement) => statement.position,
            Self::Assignment(expression) => expression.position,
            Self::If(statement) => statement.position,
            Self::While(statement) => statement.position,
            Self::For(statement) => statement.position,
            Self::Switch(block) => block.position,
            Self::Guard(statement) => statement.position,
            Self::Return(statement) => statement.position,
            Self::Throw(statement) => statement.position,
            Self::Continue { position } | Self::Break { position } => *position,
        }
    }
}

/// A `let`-style declaration binding a new name in the current scope.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationStatement {
    /// The declared name.
    pub name:     String,
    /// The initializing expression.
    pub init:     Expression,
    /// Line number in the source code.
    pub position: Position,
}

/// An assignment to a dotted selector target.
///
/// For `++` and `--` the parser supplies a literal `1` as `init`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    /// The assignment target.
    pub name:     Selector,
    /// The assignment operator token.
    pub operator: Operator,
    /// The right-hand side expression.
    pub init:     Expression,
    /// Line number in the source code.
    pub position: Position,
}

/// A conditional statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// The condition; must produce a Boolean.
    pub condition: Expression,
    /// The block executed when the condition holds.
    pub body:      Block,
    /// An optional `else if` chain or final `else` block.
    pub alternate: Option<Box<ElseClause>>,
    /// Line number in the source code.
    pub position:  Position,
}

/// The alternate branch of an [`IfStatement`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElseClause {
    /// A chained `else if`.
    If(IfStatement),
    /// A final `else` block.
    Block(Block),
}

/// A pre-checked loop statement.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// The condition re-evaluated before every pass; must produce a Boolean.
    pub condition: Expression,
    /// The loop body.
    pub body:      Block,
    /// Line number in the source code.
    pub position:  Position,
}

/// A `for` statement in one of its two header shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// The loop header.
    pub clause:   ForClause,
    /// The loop body.
    pub body:     Block,
    /// Line number in the source code.
    pub position: Position,
}

/// The header of a [`ForStatement`].
#[derive(Debug, Clone, PartialEq)]
pub enum ForClause {
    /// An init/condition/update header.
    Condition(ForCondition),
    /// An index/value iteration over an iterable.
    Range(RangeCondition),
}

/// The init/condition/update form of a `for` header.
#[derive(Debug, Clone, PartialEq)]
pub struct ForCondition {
    /// An optional declaration run once at loop entry.
    pub init:      Option<DeclarationStatement>,
    /// The condition re-evaluated before every pass; must produce a Boolean.
    pub condition: Expression,
    /// An optional update run after every pass.
    pub update:    Option<ForUpdate>,
}

/// The update clause of a [`ForCondition`].
#[derive(Debug, Clone, PartialEq)]
pub enum ForUpdate {
    /// A bare expression evaluated for its effects.
    Expression(Expression),
    /// An assignment, typically a compound one such as `i += 1`.
    Assignment(AssignmentExpression),
}

/// The index/value form of a `for` header.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeCondition {
    /// The name bound to the zero-based iteration index.
    pub index:  String,
    /// The name bound to the element for each pass.
    pub value:  String,
    /// The expression producing the iterable.
    pub target: Expression,
}

/// A multi-way comparison statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchBlock {
    /// The expression each case condition is compared against.
    pub target:   Expression,
    /// The case blocks in source order.
    pub cases:    Vec<SwitchCase>,
    /// Line number in the source code.
    pub position: Position,
}

/// A single case inside a [`SwitchBlock`].
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Whether this is the default case. At most one default is allowed.
    pub is_default: bool,
    /// The case condition; absent on the default case.
    pub condition:  Option<Expression>,
    /// The case body.
    pub body:       Block,
    /// Line number in the source code.
    pub position:   Position,
}

/// A `guard` statement delegating to the receiver's guard function.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardStatement {
    /// The expression handed to the guard function.
    pub init:     Expression,
    /// Line number in the source code.
    pub position: Position,
}

/// A `return` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// The returned expression.
    pub init:     Expression,
    /// Line number in the source code.
    pub position: Position,
}

/// A `throw` statement; its expression must produce an error value.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    /// The thrown expression.
    pub init:     Expression,
    /// Line number in the source code.
    pub position: Position,
}

/// A function declaration: argument list, optional return type, body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBlock {
    /// The declared arguments.
    pub arguments:   ArgumentList,
    /// The declared return type, if any.
    pub return_type: Option<TypeExpression>,
    /// The function body.
    pub body:        Block,
    /// Line number in the source code.
    pub position:    Position,
}

/// The declared arguments of a [`FunctionBlock`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentList {
    /// The argument entries in declaration order.
    pub items:    Vec<Argument>,
    /// Line number in the source code.
    pub position: Position,
}

/// A single entry in an [`ArgumentList`].
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A positional argument with a declared type.
    Item(ArgumentItem),
    /// A destructured object argument binding each field as its own local.
    Object(ArgumentObject),
}

/// A named argument with a type expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentItem {
    /// The argument name.
    pub key:  String,
    /// The declared type.
    pub init: TypeExpression,
}

/// A destructured object argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentObject {
    /// The destructured fields, each bound as a local by name.
    pub items:    Vec<ArgumentItem>,
    /// Line number in the source code.
    pub position: Position,
}

/// A type annotation resolving to a class through the symbol table.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpression {
    /// The dotted path naming the class.
    pub selector: Selector,
}
