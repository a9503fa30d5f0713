use super::Glyph;
use crate::highlight::TokenClass::{
    Assignment, Brace, Bracket, Comment, Function, Head, Ligature, Modifier, Modifier2, Nothing,
    Number, Paren, Separator, String as Str, Value,
};

macro_rules! doc {
    ($page:literal) => {
        concat!("https://mlochbaum.github.io/BQN/doc/", $page, ".html")
    };
}

/// Every glyph, in glyph bar order.
pub static GLYPHS: &[Glyph] = &[
    // Functions
    Glyph::new("+", None, Function).hint("Conjugate\nAdd").help(doc!("arithmetic")),
    Glyph::new("-", None, Function).hint("Negate\nSubtract").help(doc!("arithmetic")),
    Glyph::new("×", Some('='), Function).hint("Sign\nMultiply").help(doc!("arithmetic")),
    Glyph::new("÷", Some('-'), Function).hint("Reciprocal\nDivide").help(doc!("arithmetic")),
    Glyph::new("⋆", Some('+'), Function).hint("Exponential\nPower").help(doc!("arithmetic")),
    Glyph::new("√", Some('_'), Function).hint("Square Root\nRoot").help(doc!("arithmetic")),
    Glyph::new("⌊", Some('b'), Function).hint("Floor\nMinimum").help(doc!("arithmetic")),
    Glyph::new("⌈", Some('B'), Function).hint("Ceiling\nMaximum").help(doc!("arithmetic")),
    Glyph::new("|", None, Function).hint("Absolute Value\nModulus").help(doc!("arithmetic")),
    Glyph::new("¬", Some('~'), Function).hint("Not\nSpan").help(doc!("logic")),
    Glyph::new("∧", Some('t'), Function).hint("Sort Up\nAnd").help(doc!("logic")),
    Glyph::new("∨", Some('v'), Function).hint("Sort Down\nOr").help(doc!("logic")),
    Glyph::new("<", None, Function).hint("Enclose\nLess Than").help(doc!("arithmetic")),
    Glyph::new(">", None, Function).hint("Merge\nGreater Than").help(doc!("arithmetic")),
    Glyph::new("≠", Some('/'), Function).hint("Length\nNot Equals").help(doc!("shape")),
    Glyph::new("=", None, Function).hint("Rank\nEquals").help(doc!("shape")),
    Glyph::new("≤", Some('<'), Function).hint("Less Than or Equal to").help(doc!("arithmetic")),
    Glyph::new("≥", Some('>'), Function).hint("Greater Than or Equal to").help(doc!("arithmetic")),
    Glyph::new("≡", Some('m'), Function).hint("Depth\nMatch").help(doc!("depth")),
    Glyph::new("≢", Some('M'), Function).hint("Shape\nNot Match").help(doc!("shape")),
    Glyph::new("⊣", Some('{'), Function).hint("Identity\nLeft").help(doc!("identity")),
    Glyph::new("⊢", Some('}'), Function).hint("Identity\nRight").help(doc!("identity")),
    Glyph::new("⥊", Some('z'), Function).hint("Deshape\nReshape").help(doc!("reshape")),
    Glyph::new("∾", Some(','), Function).hint("Join\nJoin To").help(doc!("join")),
    Glyph::new("≍", Some('.'), Function).hint("Solo\nCouple").help(doc!("couple")),
    Glyph::new("⋈", Some('Z'), Function).hint("Enlist\nPair").help(doc!("pair")),
    Glyph::new("↑", Some('r'), Function).hint("Prefixes\nTake").help(doc!("take")),
    Glyph::new("↓", Some('c'), Function).hint("Suffixes\nDrop").help(doc!("take")),
    Glyph::new("↕", Some('d'), Function).hint("Range\nWindows").help(doc!("range")),
    Glyph::new("«", Some('H'), Function).hint("Shift Before").help(doc!("shift")),
    Glyph::new("»", Some('L'), Function).hint("Shift After").help(doc!("shift")),
    Glyph::new("⌽", Some('q'), Function).hint("Reverse\nRotate").help(doc!("reverse")),
    Glyph::new("⍉", Some('a'), Function).hint("Transpose\nReorder Axes").help(doc!("transpose")),
    Glyph::new("/", None, Function).hint("Indices\nReplicate").help(doc!("replicate")),
    Glyph::new("⍋", Some('T'), Function).hint("Grade Up\nBins Up").help(doc!("order")),
    Glyph::new("⍒", Some('V'), Function).hint("Grade Down\nBins Down").help(doc!("order")),
    Glyph::new("⊏", Some('i'), Function).hint("First Cell\nSelect").help(doc!("select")),
    Glyph::new("⊑", Some('I'), Function).hint("First\nPick").help(doc!("pick")),
    Glyph::new("⊐", Some('o'), Function).hint("Classify\nIndex of").help(doc!("search")),
    Glyph::new("⊒", Some('O'), Function).hint("Occurrence Count\nProgressive Index of").help(doc!("search")),
    Glyph::new("∊", Some('e'), Function).hint("Mark Firsts\nMember of").help(doc!("search")),
    Glyph::new("⍷", Some('E'), Function).hint("Deduplicate\nFind").help(doc!("find")),
    Glyph::new("⊔", Some('u'), Function).hint("Group Indices\nGroup").help(doc!("group")),
    Glyph::new("!", None, Function).hint("Assert\nAssert with Message").help(doc!("assert")),
    // 1-modifiers
    Glyph::new("˙", Some('"'), Modifier).hint("Constant").help(doc!("constant")),
    Glyph::new("˜", Some('`'), Modifier).hint("Self\nSwap").help(doc!("swap")),
    Glyph::new("˘", Some('1'), Modifier).hint("Cells").help(doc!("rank")),
    Glyph::new("¨", Some('2'), Modifier).hint("Each").help(doc!("map")),
    Glyph::new("⌜", Some('4'), Modifier).hint("Table").help(doc!("map")),
    Glyph::new("⁼", Some('3'), Modifier).hint("Undo").help(doc!("undo")),
    Glyph::new("´", Some('5'), Modifier).hint("Fold").help(doc!("fold")),
    Glyph::new("˝", Some('6'), Modifier).hint("Insert").help(doc!("fold")),
    Glyph::new("`", None, Modifier).hint("Scan").help(doc!("scan")),
    // 2-modifiers
    Glyph::new("∘", Some('j'), Modifier2).hint("Atop").help(doc!("compose")),
    Glyph::new("○", Some('k'), Modifier2).hint("Over").help(doc!("compose")),
    Glyph::new("⊸", Some('h'), Modifier2).hint("Before\nBind Left").help(doc!("hook")),
    Glyph::new("⟜", Some('l'), Modifier2).hint("After\nBind Right").help(doc!("hook")),
    Glyph::new("⌾", Some('K'), Modifier2).hint("Under").help(doc!("under")),
    Glyph::new("⊘", Some('%'), Modifier2).hint("Valences").help(doc!("valences")),
    Glyph::new("◶", Some('$'), Modifier2).hint("Choose").help(doc!("choose")),
    Glyph::new("⎉", Some('!'), Modifier2).hint("Rank").help(doc!("rank")),
    Glyph::new("⚇", Some('@'), Modifier2).hint("Depth").help(doc!("depth")),
    Glyph::new("⍟", Some('#'), Modifier2).hint("Repeat").help(doc!("repeat")),
    Glyph::new("⎊", Some('^'), Modifier2).hint("Catch").help(doc!("assert")),
    // Roles
    Glyph::new("𝕨", Some('w'), Value).hint("Left Argument").help(doc!("block")),
    Glyph::new("𝕎", Some('W'), Function).hint("Left Argument (as function)").help(doc!("block")),
    Glyph::new("𝕩", Some('x'), Value).hint("Right Argument").help(doc!("block")),
    Glyph::new("𝕏", Some('X'), Function).hint("Right Argument (as function)").help(doc!("block")),
    Glyph::new("𝕗", Some('f'), Value).hint("Modifier Left Operand").help(doc!("block")),
    Glyph::new("𝔽", Some('F'), Function).hint("Modifier Left Operand (as function)").help(doc!("block")),
    Glyph::new("𝕘", Some('g'), Value).hint("2-Modifier Right Operand").help(doc!("block")),
    Glyph::new("𝔾", Some('G'), Function).hint("2-Modifier Right Operand (as function)").help(doc!("block")),
    Glyph::new("𝕤", Some('s'), Value).hint("Current Function").help(doc!("block")),
    Glyph::new("𝕊", Some('S'), Function).hint("Current Function (as function)").help(doc!("block")),
    Glyph::new("𝕣", Some('R'), Value).hint("Current Modifier").help(doc!("block")),
    // Syntax
    Glyph::new("←", Some('['), Assignment).hint("Define").help(doc!("expression")),
    Glyph::new("⇐", Some('?'), Assignment).hint("Export").help(doc!("namespace")),
    Glyph::new("↩", Some('\''), Assignment).hint("Change").help(doc!("expression")),
    Glyph::new("⋄", Some(';'), Separator).hint("Separator").help(doc!("syntax")),
    Glyph::new(",", None, Separator).hint("Separator").help(doc!("syntax")),
    Glyph::new("·", Some(':'), Nothing).hint("Nothing").help(doc!("expression")),
    Glyph::new("⟨", Some('('), Bracket).paren("⟩").hint("Start List").help(doc!("arrayrepr")),
    Glyph::new("⟩", Some(')'), Bracket).hint("End List").help(doc!("arrayrepr")),
    Glyph::new("‿", Some(' '), Ligature).hint("Strand").help(doc!("arrayrepr")),
    Glyph::new("(", None, Paren).paren(")"),
    Glyph::new(")", None, Paren),
    Glyph::new("{", None, Brace).paren("}").help(doc!("block")),
    Glyph::new("}", None, Brace),
    Glyph::new("[", None, Bracket).paren("]"),
    Glyph::new("]", None, Bracket),
    Glyph::new(";", None, Head).hint("Next Case").help(doc!("block")),
    Glyph::new(":", None, Head).hint("Header").help(doc!("block")),
    Glyph::new("?", None, Head).hint("Predicate").help(doc!("block")),
    Glyph::new("\"", None, Str).paren("\"").hint("String").help(doc!("token")),
    Glyph::new("'", None, Str).paren("'").hint("Character").help(doc!("token")),
    Glyph::new("@", None, Str).hint("Null Character").help(doc!("token")),
    // Numbers and misc
    Glyph::new("¯", Some('9'), Number).hint("Minus").help(doc!("token")),
    Glyph::new("π", Some('p'), Number).hint("Pi").help(doc!("token")),
    Glyph::new("∞", Some('8'), Number).hint("Infinity").help(doc!("token")),
    Glyph::new("•", Some('0'), Value).hint("System").help(doc!("glossary")),
    Glyph::new("#", None, Comment).hint("Comment").help(doc!("token")),
];
