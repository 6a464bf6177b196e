pub const DEFAULT_POST_FILE: &str = "2013-04-09-hello-world.md";
pub const DEFAULT_POST_SRC: &str = r#"```pageinfo
title = "Hello, World"
description = "Greet the world"
```

# Hello, World!

This post doesn't name a layout, so it gets the default one.
"#;
