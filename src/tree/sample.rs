//! Built-in sample tree: a small mock project directory
//!
//! Used as the demo default and as a realistic fixture in tests and benches.

use super::Node;

fn folder(id: &str, name: &str, path: &str, children: Vec<Node>) -> Node {
    Node::Folder {
        id: id.to_string(),
        name: name.to_string(),
        path: path.to_string(),
        children,
    }
}

fn file(id: &str, name: &str, path: &str, size: &str) -> Node {
    Node::File {
        id: id.to_string(),
        name: name.to_string(),
        path: path.to_string(),
        size: Some(size.to_string()),
    }
}

/// A 22-node mock project tree (max depth 3).
pub fn sample_project() -> Node {
    folder(
        "root",
        "Project Root",
        "/",
        vec![
            folder(
                "src",
                "src",
                "/src",
                vec![
                    folder(
                        "components",
                        "components",
                        "/src/components",
                        vec![
                            file("header", "Header.js", "/src/components/Header.js", "2.1 KB"),
                            file("footer", "Footer.js", "/src/components/Footer.js", "1.8 KB"),
                            file("navbar", "Navbar.js", "/src/components/Navbar.js", "3.2 KB"),
                        ],
                    ),
                    folder(
                        "utils",
                        "utils",
                        "/src/utils",
                        vec![
                            file("helpers", "helpers.js", "/src/utils/helpers.js", "1.5 KB"),
                            file("constants", "constants.js", "/src/utils/constants.js", "0.8 KB"),
                        ],
                    ),
                    file("app", "App.js", "/src/App.js", "4.2 KB"),
                    file("index", "index.js", "/src/index.js", "0.9 KB"),
                ],
            ),
            folder(
                "public",
                "public",
                "/public",
                vec![
                    file("index-html", "index.html", "/public/index.html", "1.2 KB"),
                    file("favicon", "favicon.ico", "/public/favicon.ico", "4.1 KB"),
                    folder(
                        "assets",
                        "assets",
                        "/public/assets",
                        vec![
                            file("logo", "logo.png", "/public/assets/logo.png", "12.3 KB"),
                            file("bg", "background.jpg", "/public/assets/background.jpg", "45.7 KB"),
                        ],
                    ),
                ],
            ),
            folder(
                "docs",
                "docs",
                "/docs",
                vec![
                    file("readme", "README.md", "/docs/README.md", "3.4 KB"),
                    file("api", "API.md", "/docs/API.md", "8.9 KB"),
                ],
            ),
            file("package", "package.json", "/package.json", "2.1 KB"),
            file("gitignore", ".gitignore", "/.gitignore", "0.3 KB"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_project_shape() {
        let tree = sample_project();
        assert!(tree.validate().is_ok());
        assert_eq!(tree.node_count(), 22);
        assert_eq!(tree.edge_count(), 21);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.name(), "Project Root");
    }
}
