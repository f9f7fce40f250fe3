//! Ruby source fixtures shared by integration tests.

/// Instance assignment in a class-level method.
pub const CLASS_METHOD_ASSIGNMENT: &str = r#"module A
  module B
    def self.foo
      @x = 1
    end
  end
end
"#;

/// The same assignment directly in the namespace body.
pub const BODY_ASSIGNMENT: &str = r#"module A
  module B
    @x = 1
  end
end
"#;

/// A small library file exercising every handler.
pub const WIDGET_LIBRARY: &str = r#"# Widgets and their parts.
module Widgets
  # Something you can render.
  class Widget < Base
    @@count = 0

    # Build a widget.
    def self.build(name, size = 1)
      @registry = {}
      new(name, size)
    end

    # Render the widget as +html+.
    def render(io)
      @rendered = true if io
      items.each do |item|
        @last = item
      end
    end

    class << self
      def reset!
        @@count = 0
      end
    end
  end
end
"#;

/// Reopens `Widgets::Widget` from another file.
pub const WIDGET_EXTENSION: &str = r#"module Widgets
  class Widget
    def size
      @size
    end
  end
end
"#;
