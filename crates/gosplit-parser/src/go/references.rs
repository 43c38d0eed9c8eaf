//! Identifiers a declaration may use to reach an imported package.

use std::collections::BTreeSet;

use ast_grep_core::Node;

use crate::parser::walk;

/// Every identifier referenced inside `node`: selector operands, call targets,
/// free identifiers, and the package qualifiers of qualified types.
///
/// Names introduced by the declaration itself (function names, parameters,
/// `const`/`var` names, the left side of `:=` and `range`) are skipped.
pub(super) fn collect<D: ast_grep_core::Doc>(node: &Node<D>) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    walk(node, &mut |n| match n.kind().as_ref() {
        "identifier" if !is_declaration_site(n) => {
            names.insert(n.text().to_string());
        }
        "package_identifier" => {
            names.insert(n.text().to_string());
        }
        _ => {}
    });
    names
}

fn is_declaration_site<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    match parent.kind().as_ref() {
        "function_declaration"
        | "const_spec"
        | "var_spec"
        | "parameter_declaration"
        | "variadic_parameter_declaration" => true,
        "expression_list" => parent.parent().is_some_and(|owner| {
            matches!(
                owner.kind().as_ref(),
                "short_var_declaration" | "range_clause"
            ) && owner
                .field("left")
                .is_some_and(|left| left.range() == parent.range())
        }),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    fn refs(source: &str) -> Vec<String> {
        let tree = parse_source(source);
        let root = tree.root();
        let decl = root
            .children()
            .find(|c| c.kind().as_ref() == "function_declaration")
            .expect("function");
        collect(&decl).into_iter().collect()
    }

    #[test]
    fn selector_operands_and_qualified_types() {
        let names = refs(
            "package p\n\nfunc Serve(w http.ResponseWriter) {\n\tfmt.Fprintln(w, strings.ToUpper(\"ok\"))\n}\n",
        );
        assert_eq!(names, vec!["fmt", "http", "strings", "w"]);
    }

    #[test]
    fn declared_names_are_not_references() {
        let names = refs(
            "package p\n\nfunc Sum(values []int) int {\n\ttotal := 0\n\tfor _, v := range values {\n\t\ttotal += v\n\t}\n\treturn total\n}\n",
        );
        assert_eq!(names, vec!["total", "v", "values"]);
    }

    #[test]
    fn call_targets_are_references() {
        let names = refs("package p\n\nfunc Run() {\n\thelper()\n}\n");
        assert_eq!(names, vec!["helper"]);
    }
}
