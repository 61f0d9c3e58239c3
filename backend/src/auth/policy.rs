//! Route access policy
//!
//! An ordered list of rules, evaluated first-match-wins, deciding for every
//! inbound request whether it passes freely, needs a verified principal, or
//! is refused outright. Anything no rule matches is refused.

use axum::http::Method;

/// Outcome of evaluating the policy for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable without a token
    Permit,
    /// Requires a valid token; the principal is attached before the handler runs
    Authenticated,
    /// Refused by the chain, token or not
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`: exactly one segment
    Any,
    /// trailing `**`: zero or more segments
    Rest,
}

/// A `/`-separated path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|segment| match segment {
                "*" => Segment::Any,
                "**" => Segment::Rest,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();

        Self { segments }
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut parts = split_path(path);

        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Any => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(expected) => match parts.next() {
                    Some(part) if part == expected => {}
                    _ => return false,
                },
            }
        }

        parts.next().is_none()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// One policy entry
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub pattern: PathPattern,
    /// `None` matches every method
    pub method: Option<Method>,
    pub access: Access,
}

impl RouteRule {
    fn applies_to(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().map_or(true, |m| m == method) && self.pattern.matches(path)
    }
}

/// Ordered route rules with a default-deny fallback
#[derive(Debug, Clone, Default)]
pub struct RoutePolicy {
    rules: Vec<RouteRule>,
}

impl RoutePolicy {
    pub fn builder() -> RoutePolicyBuilder {
        RoutePolicyBuilder::default()
    }

    /// The rules the API ships with
    ///
    /// Enrollment, login, logout and health probes (`GET` and `HEAD`) are
    /// open; everything under `/api` needs a token; anything else is denied.
    pub fn standard() -> Self {
        Self::builder()
            .permit(Method::POST, "/api/user/create")
            .permit(Method::POST, "/login")
            .permit_any("/logout")
            .permit(Method::GET, "/health/**")
            .permit(Method::HEAD, "/health/**")
            .authenticated_any("/api/**")
            .build()
    }

    /// First matching rule wins; no match is a denial
    pub fn decide(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.applies_to(method, path))
            .map_or(Access::Deny, |rule| rule.access)
    }
}

/// Builder keeping rules in declaration order
#[derive(Debug, Default)]
pub struct RoutePolicyBuilder {
    rules: Vec<RouteRule>,
}

impl RoutePolicyBuilder {
    pub fn rule(mut self, method: Option<Method>, pattern: &str, access: Access) -> Self {
        self.rules.push(RouteRule {
            pattern: PathPattern::new(pattern),
            method,
            access,
        });
        self
    }

    pub fn permit(self, method: Method, pattern: &str) -> Self {
        self.rule(Some(method), pattern, Access::Permit)
    }

    pub fn permit_any(self, pattern: &str) -> Self {
        self.rule(None, pattern, Access::Permit)
    }

    pub fn authenticated(self, method: Method, pattern: &str) -> Self {
        self.rule(Some(method), pattern, Access::Authenticated)
    }

    pub fn authenticated_any(self, pattern: &str) -> Self {
        self.rule(None, pattern, Access::Authenticated)
    }

    pub fn deny_any(self, pattern: &str) -> Self {
        self.rule(None, pattern, Access::Deny)
    }

    pub fn build(self) -> RoutePolicy {
        RoutePolicy { rules: self.rules }
    }
}
