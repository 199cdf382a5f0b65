//! Renders a small page built from scoped components and prints the HTML.
//!
//! Run with: `cargo run -p stylescope --example testpage --features macros`
//!
//! Id allocation and style registration are logged to stderr at debug level.

use stylescope::{css, BindingOptions, Registry, RegistryConfig, StyleBinding};

struct Item {
    label: &'static str,
    color: &'static str,
}

fn container(registry: &Registry, children: &[String]) -> String {
    let css = registry.mint("container");
    css.invoke(css!(
        r#"
        ## {
          width: 500px;
        }
        ## > header {
          color: red;
        }
        ##-contents {
          display: flex;
          width: 500px;
        }
        "#
    ));

    format!(
        "<div id=\"{id}\"><header>******</header><div id=\"{id}-contents\">{}</div><footer>%%%%%%</footer></div>",
        children.concat(),
        id = css.id(),
    )
}

/// Shares one memoized binding across every box, so the style block is
/// computed and stored once. Per-instance colors go in the style attribute.
fn boxed(css: &StyleBinding, item: &Item) -> String {
    css.invoke(css!(
        r#"
        ## {
          display: flex;
          align-items: center;
          justify-content: center;
          margin: 5px;
          border: 1px solid black;
          width: 100px;
          height: 100px;
        }
        ## .label {
          color: #0ff;
        }
        "#
    ));

    format!(
        "<div id=\"{}\" style=\"background-color: {}\"><div class=\"label\">{}</div></div>",
        css.id(),
        item.color,
        item.label,
    )
}

/// Mints a binding per circle, so every instance carries its own style block.
fn circle(registry: &Registry, item: &Item) -> String {
    let css = registry.mint("circle");
    let color = item.color;
    css.invoke(css!(
        r#"
        ## {
          display: flex;
          align-items: center;
          justify-content: center;
          margin: 5px;
          border: 1px solid black;
          background-color: ${color};
          border-radius: 50%;
          width: 100px;
          height: 100px;
        }
        ## .label {
          color: #0ff;
        }
        "#
    ));

    format!(
        "<div id=\"{}\"><div class=\"label\">{}</div></div>",
        css.id(),
        item.label,
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let items = [
        Item { label: "A", color: "red" },
        Item { label: "B", color: "blue" },
        Item { label: "C", color: "green" },
    ];

    let registry = Registry::new(RegistryConfig::new().with_defer(true));
    let box_css = registry.mint_binding("box", BindingOptions::new().once(true));

    let boxes: Vec<String> = items.iter().map(|item| boxed(&box_css, item)).collect();
    let circles: Vec<String> = items.iter().map(|item| circle(&registry, item)).collect();

    let body = [container(&registry, &boxes), container(&registry, &circles)].concat();

    // The stylesheet is assembled only after every component has rendered
    let html = format!(
        "<html><head><style>{}</style></head><body>{}</body></html>",
        registry.all_css(),
        body,
    );

    println!("{}", html);
}
