use super::form::Form;
use super::policy::{Declaration, Policy};
use super::proof::Proof;
use super::term::Term;

/// Maximum nesting depth allowed while parsing, mirroring the guard the
/// rest of this codebase's recursive-descent parsers use to turn a
/// pathologically deep input into a clean error instead of a stack
/// overflow.
const MAX_PARSE_DEPTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse error at position {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParseError {}

/// A single recursive-descent parser shared by `Term`, `Form`, `Proof`
/// and `Policy` — the grammars for policies and typings both embed the
/// same formula grammar (spec §6), exactly as the original reference
/// implementation's `formula_grammar` was shared between its
/// `policy_grammar` and `typing_grammar`, so one scanner/parser handles
/// all of it rather than three copies of the same character-pushing
/// code.
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0, depth: 0 }
    }

    fn enter_depth(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_PARSE_DEPTH {
            return Err(self.error(format!("input too deeply nested (max {} levels)", MAX_PARSE_DEPTH)));
        }
        Ok(())
    }

    fn exit_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError { message: message.into(), position: self.pos }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    /// Consumes a literal token if present, skipping leading whitespace.
    fn matches(&mut self, s: &str) -> bool {
        self.skip_whitespace();
        if self.input[self.pos..].starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes a keyword (e.g. `says`, `let`, `in`) if present, requiring
    /// it not be a prefix of a longer identifier.
    fn matches_keyword(&mut self, kw: &str) -> bool {
        self.skip_whitespace();
        let rest = &self.input[self.pos..];
        if rest.starts_with(kw) {
            let after = &rest[kw.len()..];
            let boundary = after.chars().next().map_or(true, |c| !is_ident_char(c));
            if boundary {
                self.pos += kw.len();
                return true;
            }
        }
        false
    }

    fn peek_keyword(&mut self, kw: &str) -> bool {
        let checkpoint = self.pos;
        let matched = self.matches_keyword(kw);
        self.pos = checkpoint;
        matched
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut first = true;
        while let Some(c) = self.current_char() {
            let ok = if first { c.is_ascii_alphabetic() } else { is_ident_char(c) };
            if !ok {
                break;
            }
            first = false;
            self.pos += c.len_utf8();
        }
        if self.pos == start {
            return Err(self.error("expected an identifier"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    // ---- terms -----------------------------------------------------

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        let id = self.parse_identifier()?;
        match id.chars().next() {
            Some(c) if c.is_uppercase() => Ok(Term::Variable(id)),
            Some(_) => Ok(Term::Constant(id)),
            None => unreachable!("parse_identifier never returns an empty string"),
        }
    }

    // ---- formulas ----------------------------------------------------
    //
    // Precedence, loosest to tightest: `says` (right-associating, weaker
    // than `->`), `->` (right-associative), atoms/quantification/parens.

    pub fn parse_form(&mut self) -> Result<Form, ParseError> {
        self.parse_says()
    }

    fn parse_says(&mut self) -> Result<Form, ParseError> {
        let checkpoint = self.pos;
        if let Ok(agent) = self.parse_term() {
            if self.matches_keyword("says") {
                self.enter_depth()?;
                let body = self.parse_says()?;
                self.exit_depth();
                return Ok(Form::says(agent, body));
            }
        }
        self.pos = checkpoint;
        self.parse_implies()
    }

    fn parse_implies(&mut self) -> Result<Form, ParseError> {
        let left = self.parse_atomic_form()?;
        self.skip_whitespace();
        if self.matches("->") {
            self.enter_depth()?;
            let right = self.parse_implies()?;
            self.exit_depth();
            return Ok(Form::implies(left, right));
        }
        Ok(left)
    }

    fn parse_atomic_form(&mut self) -> Result<Form, ParseError> {
        self.skip_whitespace();
        if self.matches("!") {
            self.enter_depth()?;
            let variable = self.parse_identifier()?;
            if variable.chars().next().map_or(false, |c| !c.is_uppercase()) {
                return Err(self.error(format!("quantified variable '{}' must be uppercase-initial", variable)));
            }
            self.skip_whitespace();
            if !self.matches(".") {
                return Err(self.error("expected '.' after quantified variable"));
            }
            let body = self.parse_form()?;
            self.exit_depth();
            return Ok(Form::forall(variable, body));
        }

        if self.matches("(") {
            self.enter_depth()?;
            let inner = self.parse_form()?;
            self.skip_whitespace();
            if !self.matches(")") {
                return Err(self.error("expected closing ')'"));
            }
            self.exit_depth();
            return Ok(inner);
        }

        let predicate = self.parse_identifier()?;
        if predicate.chars().next().map_or(false, |c| !c.is_lowercase()) {
            return Err(self.error(format!("predicate '{}' must be lowercase-initial", predicate)));
        }
        self.skip_whitespace();
        if !self.matches("(") {
            return Err(self.error("expected '(' after predicate name"));
        }
        let terms = self.parse_term_list()?;
        self.skip_whitespace();
        if !self.matches(")") {
            return Err(self.error("expected closing ')' after argument list"));
        }
        Ok(Form::atom(predicate, terms))
    }

    fn parse_term_list(&mut self) -> Result<Vec<Term>, ParseError> {
        self.skip_whitespace();
        if self.current_char() == Some(')') {
            return Ok(Vec::new());
        }
        let mut terms = vec![self.parse_term()?];
        loop {
            self.skip_whitespace();
            if self.matches(",") {
                terms.push(self.parse_term()?);
            } else {
                break;
            }
        }
        Ok(terms)
    }

    // ---- policy --------------------------------------------------------

    pub fn parse_policy(&mut self) -> Result<Policy, ParseError> {
        let mut declarations = Vec::new();
        loop {
            self.skip_whitespace();
            if self.pos >= self.input.len() {
                break;
            }
            let name = self.parse_identifier()?;
            self.skip_whitespace();
            if !self.matches(":") {
                return Err(self.error("expected ':' after declaration name"));
            }
            let formula = self.parse_form()?;
            self.skip_whitespace();
            if !self.matches(";") {
                return Err(self.error("expected ';' after declaration"));
            }
            declarations.push(Declaration::new(name, formula));
        }
        Ok(Policy::new(declarations))
    }

    // ---- proofs ----------------------------------------------------

    pub fn parse_proof(&mut self) -> Result<Proof, ParseError> {
        self.skip_whitespace();
        if self.peek_keyword("let") {
            return self.parse_let();
        }
        self.parse_applications()
    }

    fn parse_let(&mut self) -> Result<Proof, ParseError> {
        self.matches_keyword("let");
        self.skip_whitespace();
        if self.matches("{") {
            self.enter_depth()?;
            let v = self.parse_identifier()?;
            self.skip_whitespace();
            if !self.matches("}") {
                return Err(self.error("expected closing '}' after let-wrap binder"));
            }
            if !self.matches("_") {
                return Err(self.error("expected '_' before let-wrap agent"));
            }
            let a = self.parse_term()?;
            self.skip_whitespace();
            if !self.matches("=") {
                return Err(self.error("expected '=' in let-wrap"));
            }
            let m = self.parse_proof()?;
            if !self.matches_keyword("in") {
                return Err(self.error("expected 'in' in let-wrap"));
            }
            let n = self.parse_proof()?;
            self.exit_depth();
            return Ok(Proof::let_wrap(v, a, m, n));
        }

        let v = self.parse_identifier()?;
        self.skip_whitespace();
        if !self.matches("=") {
            return Err(self.error("expected '=' in let"));
        }
        self.enter_depth()?;
        let m = self.parse_proof()?;
        if !self.matches_keyword("in") {
            return Err(self.error("expected 'in' in let"));
        }
        let n = self.parse_proof()?;
        self.exit_depth();
        Ok(Proof::let_(v, m, n))
    }

    /// Application by juxtaposition and instantiation by `[t]` share a
    /// precedence level and associate left to right (spec §6): `M N [t]
    /// P` parses as `((M N) [t]) P`.
    fn parse_applications(&mut self) -> Result<Proof, ParseError> {
        let mut acc = self.parse_base_proof()?;
        loop {
            self.skip_whitespace();
            if self.matches("[") {
                self.enter_depth()?;
                let t = self.parse_term()?;
                self.skip_whitespace();
                if !self.matches("]") {
                    return Err(self.error("expected closing ']' after instantiation term"));
                }
                self.exit_depth();
                acc = Proof::inst(acc, t);
                continue;
            }
            if self.starts_base_proof() {
                let rhs = self.parse_base_proof()?;
                acc = Proof::app(acc, rhs);
                continue;
            }
            break;
        }
        Ok(acc)
    }

    fn starts_base_proof(&mut self) -> bool {
        self.skip_whitespace();
        if self.peek_keyword("let") || self.peek_keyword("in") {
            return false;
        }
        matches!(self.current_char(), Some('(') | Some('{'))
            || matches!(self.current_char(), Some(c) if c.is_ascii_alphabetic())
    }

    fn parse_base_proof(&mut self) -> Result<Proof, ParseError> {
        self.skip_whitespace();
        if self.matches("{") {
            self.enter_depth()?;
            let m = self.parse_proof()?;
            self.skip_whitespace();
            if !self.matches("}") {
                return Err(self.error("expected closing '}' after wrapped proof"));
            }
            if !self.matches("_") {
                return Err(self.error("expected '_' before wrap agent"));
            }
            let a = self.parse_term()?;
            self.exit_depth();
            return Ok(Proof::wrap(m, a));
        }
        if self.matches("(") {
            self.enter_depth()?;
            let m = self.parse_proof()?;
            self.skip_whitespace();
            if !self.matches(")") {
                return Err(self.error("expected closing ')'"));
            }
            self.exit_depth();
            return Ok(m);
        }
        let name = self.parse_identifier()?;
        Ok(Proof::pvar(name))
    }

    pub fn parse_typing(&mut self) -> Result<(Proof, Form), ParseError> {
        let proof = self.parse_proof()?;
        self.skip_whitespace();
        if !self.matches(":") {
            return Err(self.error("expected ':' between proof and claimed formula"));
        }
        let form = self.parse_form()?;
        Ok((proof, form))
    }

    pub fn finish(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(self.error(format!(
                "unexpected trailing input: '{}'",
                &self.input[self.pos..]
            )));
        }
        Ok(())
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\''
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_form(s: &str) -> Form {
        let mut p = Parser::new(s);
        let f = p.parse_form().unwrap();
        p.finish().unwrap();
        f
    }

    fn parse_proof(s: &str) -> Proof {
        let mut p = Parser::new(s);
        let m = p.parse_proof().unwrap();
        p.finish().unwrap();
        m
    }

    #[test]
    fn parses_nullary_atom() {
        assert_eq!(parse_form("p()"), Form::atom("p", vec![]));
    }

    #[test]
    fn parses_atom_with_mixed_terms() {
        assert_eq!(
            parse_form("p(X, c)"),
            Form::atom("p", vec![Term::variable("X"), Term::constant("c")])
        );
    }

    #[test]
    fn parses_right_associative_implication() {
        let f = parse_form("p() -> q() -> r()");
        assert_eq!(
            f,
            Form::implies(Form::atom("p", vec![]), Form::implies(Form::atom("q", vec![]), Form::atom("r", vec![])))
        );
    }

    #[test]
    fn says_is_weaker_than_implies() {
        let f = parse_form("alice says p() -> q()");
        assert_eq!(
            f,
            Form::says(
                Term::constant("alice"),
                Form::implies(Form::atom("p", vec![]), Form::atom("q", vec![]))
            )
        );
    }

    #[test]
    fn says_chains_right_associatively() {
        let f = parse_form("alice says bob says p()");
        assert_eq!(
            f,
            Form::says(Term::constant("alice"), Form::says(Term::constant("bob"), Form::atom("p", vec![])))
        );
    }

    #[test]
    fn parses_forall() {
        let f = parse_form("!X. p(X)");
        assert_eq!(f, Form::forall("X", Form::atom("p", vec![Term::variable("X")])));
    }

    #[test]
    fn parses_policy_with_trailing_semicolons() {
        let mut p = Parser::new("h1 : p(); h2 : (p() -> q());");
        let policy = p.parse_policy().unwrap();
        p.finish().unwrap();
        assert_eq!(policy.len(), 2);
        assert_eq!(policy.lookup("h1"), Some(&Form::atom("p", vec![])));
    }

    #[test]
    fn parses_application_left_associatively() {
        let m = parse_proof("h2 h1 h0");
        assert_eq!(m, Proof::app(Proof::app(Proof::pvar("h2"), Proof::pvar("h1")), Proof::pvar("h0")));
    }

    #[test]
    fn parses_instantiation() {
        let m = parse_proof("h [c]");
        assert_eq!(m, Proof::inst(Proof::pvar("h"), Term::constant("c")));
    }

    #[test]
    fn parses_wrap() {
        let m = parse_proof("{ h }_alice");
        assert_eq!(m, Proof::wrap(Proof::pvar("h"), Term::constant("alice")));
    }

    #[test]
    fn parses_let_wrap_then_reintroduce() {
        let m = parse_proof("let {x}_alice = h1 in ({ h2 x }_alice)");
        assert_eq!(
            m,
            Proof::let_wrap(
                "x",
                Term::constant("alice"),
                Proof::pvar("h1"),
                Proof::wrap(Proof::app(Proof::pvar("h2"), Proof::pvar("x")), Term::constant("alice"))
            )
        );
    }

    #[test]
    fn parses_typing_judgment() {
        let mut p = Parser::new("h2 h1 : q()");
        let (proof, form) = p.parse_typing().unwrap();
        p.finish().unwrap();
        assert_eq!(proof, Proof::app(Proof::pvar("h2"), Proof::pvar("h1")));
        assert_eq!(form, Form::atom("q", vec![]));
    }

    #[test]
    fn rejects_lowercase_quantified_variable() {
        let mut p = Parser::new("!x. p(x)");
        assert!(p.parse_form().is_err());
    }

    #[test]
    fn trailing_garbage_is_rejected_by_finish() {
        let mut p = Parser::new("p() q()");
        p.parse_form().unwrap();
        assert!(p.finish().is_err());
    }
}
