//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Collapse the variable parts of a request path so that span names and
/// metric labels stay low-cardinality.
pub(super) fn route_template(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    if path.starts_with("/uploads/") {
        return "/uploads/{path}".to_owned();
    }

    let mut template = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            template.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            template.push_str("{id}");
        } else {
            template.push_str(segment);
        }
    }

    template
}

#[cfg(test)]
mod tests {
    use super::route_template;

    #[test]
    fn product_ids_are_replaced() {
        assert_eq!(
            route_template("/api/products/0192f0c1-a2b3-7c5d-8e6f-123456789abc/stock"),
            "/api/products/{id}/stock"
        );
    }

    #[test]
    fn static_routes_are_untouched() {
        assert_eq!(route_template("/api/products/stats"), "/api/products/stats");
        assert_eq!(route_template("/"), "/");
    }

    #[test]
    fn upload_paths_collapse() {
        assert_eq!(
            route_template("/uploads/1700000000000-brake-pad.png"),
            "/uploads/{path}"
        );
    }
}
