//! Sample sources with directives, written as they sit on disk before any run.

/// A class with an `if`/`else` block on `~1.20.1`, currently switched to 1.20.x.
pub const COMPAT_JAVA: &str = "\
package demo;

class Compat {
    /*? if ~1.20.1 {*/
    void render() { newApi(); }
    /*?} else {*/
    /*void render() { oldApi(); }*/
    /*?} */
}
";

/// The same class after switching to 1.19.
pub const COMPAT_JAVA_1_19: &str = "\
package demo;

class Compat {
    /*? if ~1.20.1 {*//*
    void render() { newApi(); }
    *//*?} else {*/
    void render() { oldApi(); }
    /*?} */
}
";

/// Single-line directives only.
pub const REGISTRY_KT: &str = "\
object Registry {
    fun init() {
        /*? if >=1.20 */
        registerNew()
        /*? if <1.20 */
        /*registerOld()*/
    }
}
";

/// `REGISTRY_KT` after switching to 1.19.
pub const REGISTRY_KT_1_19: &str = "\
object Registry {
    fun init() {
        /*? if >=1.20 */
/*        registerNew()*/
        /*? if <1.20 */
        registerOld()
    }
}
";

/// No directives at all.
pub const PLAIN_JAVA: &str = "class Plain {}\n";

/// A closer with no open block.
pub const BROKEN_JAVA: &str = "class Broken {\n    /*?}*/\n}\n";
