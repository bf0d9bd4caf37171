//! Glyph name to Unicode list derived from the Adobe Glyph List.
//!
//! Sorted by name (byte order) for binary search.

/// `(glyph name, Unicode scalar)` pairs.
pub static GLYPH_LIST: &[(&str, char)] = &[
    ("A", '\u{0041}'),
    ("AE", '\u{00C6}'),
    ("AEsmall", '\u{F7A7}'),
    ("Aacute", '\u{00C1}'),
    ("Aacutesmall", '\u{F6F0}'),
    ("Acircumflex", '\u{00C2}'),
    ("Acircumflexsmall", '\u{F7A3}'),
    ("Acute", '\u{00B4}'),
    ("Acutesmall", '\u{F7B4}'),
    ("Adieresis", '\u{00C4}'),
    ("Adieresissmall", '\u{F7A5}'),
    ("Agrave", '\u{00C0}'),
    ("Agravesmall", '\u{F6EF}'),
    ("Alpha", '\u{0391}'),
    ("Apple", '\u{F8FF}'),
    ("Aring", '\u{00C5}'),
    ("Aringsmall", '\u{F7A6}'),
    ("Asmall", '\u{F6F1}'),
    ("Atilde", '\u{00C3}'),
    ("Atildesmall", '\u{F7A4}'),
    ("B", '\u{0042}'),
    ("Beta", '\u{0392}'),
    ("Broken", '\u{00A6}'),
    ("Bsmall", '\u{F6F2}'),
    ("Bullet", '\u{2022}'),
    ("C", '\u{0043}'),
    ("Ccedilla", '\u{00C7}'),
    ("Ccedillasmall", '\u{F7A9}'),
    ("Cedilla", '\u{00B8}'),
    ("Cedillasmall", '\u{F7B8}'),
    ("Cent", '\u{00A2}'),
    ("Chi", '\u{03A7}'),
    ("Circumflexsmall", '\u{F6F9}'),
    ("Commasmall", '\u{F6FA}'),
    ("Copyright", '\u{00A9}'),
    ("Csmall", '\u{F7A3}'),
    ("Currency", '\u{00A4}'),
    ("D", '\u{0044}'),
    ("Dagger", '\u{2020}'),
    ("Degree", '\u{00B0}'),
    ("Delta", '\u{0394}'),
    ("Diaeresis", '\u{00A8}'),
    ("Dieresissmall", '\u{F7A8}'),
    ("Division", '\u{00F7}'),
    ("Double", '\u{201E}'),
    ("Dsmall", '\u{F6F4}'),
    ("E", '\u{0045}'),
    ("Eacute", '\u{00C9}'),
    ("Eacutesmall", '\u{F7AB}'),
    ("Ecircumflex", '\u{00CA}'),
    ("Ecircumflexsmall", '\u{F7AC}'),
    ("Edieresis", '\u{00CB}'),
    ("Edieresissmall", '\u{F7AD}'),
    ("Egrave", '\u{00C8}'),
    ("Egravesmall", '\u{F7AA}'),
    ("Em", '\u{2014}'),
    ("En", '\u{2013}'),
    ("Epsilon", '\u{0395}'),
    ("Esmall", '\u{F6F5}'),
    ("Eta", '\u{0397}'),
    ("Eth", '\u{00D0}'),
    ("Ethsmall", '\u{F7B2}'),
    ("Euro", '\u{20AC}'),
    ("F", '\u{0046}'),
    ("Feminine", '\u{00AA}'),
    ("Fsmall", '\u{F6F6}'),
    ("G", '\u{0047}'),
    ("Gamma", '\u{0393}'),
    ("Gravesmall", '\u{F7F0}'),
    ("Gsmall", '\u{F6F7}'),
    ("H", '\u{0048}'),
    ("Horizontal", '\u{2026}'),
    ("Hsmall", '\u{F6F8}'),
    ("Hungarumlautsmall", '\u{F6C9}'),
    ("I", '\u{0049}'),
    ("Iacute", '\u{00CD}'),
    ("Iacutesmall", '\u{F7AF}'),
    ("Icircumflex", '\u{00CE}'),
    ("Icircumflexsmall", '\u{F7B0}'),
    ("Idieresis", '\u{00CF}'),
    ("Idieresissmall", '\u{F7B1}'),
    ("Ifraktur", '\u{2111}'),
    ("Igrave", '\u{00CC}'),
    ("Igravesmall", '\u{F7AE}'),
    ("Inverted", '\u{00A1}'),
    ("Iota", '\u{0399}'),
    ("Ismall", '\u{F6E3}'),
    ("J", '\u{004A}'),
    ("Jsmall", '\u{F6FA}'),
    ("K", '\u{004B}'),
    ("Kappa", '\u{039A}'),
    ("Ksmall", '\u{F6FB}'),
    ("L", '\u{004C}'),
    ("Lambda", '\u{039B}'),
    ("Latin", '\u{0192}'),
    ("Left", '\u{2018}'),
    ("Lslash", '\u{0141}'),
    ("Lslashsmall", '\u{F6E6}'),
    ("Lsmall", '\u{F6FC}'),
    ("M", '\u{004D}'),
    ("Macron", '\u{00AF}'),
    ("Macronsmall", '\u{F7AF}'),
    ("Masculine", '\u{00BA}'),
    ("Micro", '\u{00B5}'),
    ("Middle", '\u{00B7}'),
    ("Modifier", '\u{02C6}'),
    ("Msmall", '\u{F6FD}'),
    ("Mu", '\u{039C}'),
    ("Multiplication", '\u{00D7}'),
    ("N", '\u{004E}'),
    ("No", '\u{00A0}'),
    ("Not", '\u{00AC}'),
    ("Nsmall", '\u{F6FE}'),
    ("Ntilde", '\u{00D1}'),
    ("Ntildesmall", '\u{F7B3}'),
    ("Nu", '\u{039D}'),
    ("O", '\u{004F}'),
    ("OE", '\u{0152}'),
    ("OEsmall", '\u{F6EB}'),
    ("Oacute", '\u{00D3}'),
    ("Oacutesmall", '\u{F7B5}'),
    ("Ocircumflex", '\u{00D4}'),
    ("Ocircumflexsmall", '\u{F7B6}'),
    ("Odieresis", '\u{00D6}'),
    ("Odieresissmall", '\u{F7B8}'),
    ("Ograve", '\u{00D2}'),
    ("Ogravesmall", '\u{F7B4}'),
    ("Omega", '\u{03A9}'),
    ("Omicron", '\u{039F}'),
    ("Only", '\u{0046}'),
    ("Oslash", '\u{00D8}'),
    ("Oslashsmall", '\u{F7BA}'),
    ("Osmall", '\u{F6FF}'),
    ("Otilde", '\u{00D5}'),
    ("Otildesmall", '\u{F7B7}'),
    ("P", '\u{0050}'),
    ("Per", '\u{2030}'),
    ("Phi", '\u{03A6}'),
    ("Pi", '\u{03A0}'),
    ("Pilcrow", '\u{00B6}'),
    ("Plus", '\u{00B1}'),
    ("Pound", '\u{00A3}'),
    ("Psi", '\u{03A8}'),
    ("Psmall", '\u{F700}'),
    ("Q", '\u{0051}'),
    ("Qsmall", '\u{F701}'),
    ("R", '\u{0052}'),
    ("Registered", '\u{00AE}'),
    ("Rfraktur", '\u{211C}'),
    ("Rho", '\u{03A1}'),
    ("Right", '\u{2019}'),
    ("Rsmall", '\u{F702}'),
    ("S", '\u{0053}'),
    ("Scaron", '\u{0160}'),
    ("Scaronsmall", '\u{F6E7}'),
    ("Section", '\u{00A7}'),
    ("Sigma", '\u{03A3}'),
    ("Single", '\u{201A}'),
    ("Small", '\u{02DC}'),
    ("Soft", '\u{00AD}'),
    ("Ssmall", '\u{F703}'),
    ("Superscript", '\u{00B2}'),
    ("T", '\u{0054}'),
    ("Tau", '\u{03A4}'),
    ("Theta", '\u{0398}'),
    ("Thorn", '\u{00DE}'),
    ("Thornsmall", '\u{F7C0}'),
    ("Tildesmall", '\u{F6DE}'),
    ("Trade", '\u{2122}'),
    ("Tsmall", '\u{F704}'),
    ("U", '\u{0055}'),
    ("Uacute", '\u{00DA}'),
    ("Uacutesmall", '\u{F7BC}'),
    ("Ucircumflex", '\u{00DB}'),
    ("Ucircumflexsmall", '\u{F7BD}'),
    ("Udieresis", '\u{00DC}'),
    ("Udieresissmall", '\u{F7BE}'),
    ("Ugrave", '\u{00D9}'),
    ("Ugravesmall", '\u{F7BB}'),
    ("Upsilon", '\u{03A5}'),
    ("Upsilon1", '\u{03D2}'),
    ("Usmall", '\u{F705}'),
    ("V", '\u{0056}'),
    ("Vsmall", '\u{F706}'),
    ("Vulgar", '\u{00BC}'),
    ("W", '\u{0057}'),
    ("Wsmall", '\u{F707}'),
    ("X", '\u{0058}'),
    ("Xi", '\u{039E}'),
    ("Xsmall", '\u{F708}'),
    ("Y", '\u{0059}'),
    ("Yacute", '\u{00DD}'),
    ("Yacutesmall", '\u{F7BF}'),
    ("Ydieresis", '\u{0178}'),
    ("Ydieresissmall", '\u{F7C1}'),
    ("Yen", '\u{00A5}'),
    ("Ysmall", '\u{F709}'),
    ("Z", '\u{005A}'),
    ("Zcaron", '\u{017D}'),
    ("Zcaronsmall", '\u{F6E8}'),
    ("Zeta", '\u{0396}'),
    ("Zsmall", '\u{F70A}'),
    ("a", '\u{0061}'),
    ("a1", '\u{2701}'),
    ("a10", '\u{2721}'),
    ("a100", '\u{275E}'),
    ("a101", '\u{2761}'),
    ("a102", '\u{2762}'),
    ("a103", '\u{2763}'),
    ("a104", '\u{2764}'),
    ("a105", '\u{2710}'),
    ("a106", '\u{2765}'),
    ("a107", '\u{2766}'),
    ("a108", '\u{2767}'),
    ("a109", '\u{2660}'),
    ("a11", '\u{261B}'),
    ("a110", '\u{2665}'),
    ("a111", '\u{2666}'),
    ("a112", '\u{2663}'),
    ("a117", '\u{2709}'),
    ("a118", '\u{2708}'),
    ("a119", '\u{2707}'),
    ("a12", '\u{261E}'),
    ("a120", '\u{2460}'),
    ("a121", '\u{2461}'),
    ("a122", '\u{2462}'),
    ("a123", '\u{2463}'),
    ("a124", '\u{2464}'),
    ("a125", '\u{2465}'),
    ("a126", '\u{2466}'),
    ("a127", '\u{2467}'),
    ("a128", '\u{2468}'),
    ("a129", '\u{2469}'),
    ("a13", '\u{270C}'),
    ("a130", '\u{2776}'),
    ("a131", '\u{2777}'),
    ("a132", '\u{2778}'),
    ("a133", '\u{2779}'),
    ("a134", '\u{277A}'),
    ("a135", '\u{277B}'),
    ("a136", '\u{277C}'),
    ("a137", '\u{277D}'),
    ("a138", '\u{277E}'),
    ("a139", '\u{277F}'),
    ("a14", '\u{270D}'),
    ("a140", '\u{2780}'),
    ("a141", '\u{2781}'),
    ("a142", '\u{2782}'),
    ("a143", '\u{2783}'),
    ("a144", '\u{2784}'),
    ("a145", '\u{2785}'),
    ("a146", '\u{2786}'),
    ("a147", '\u{2787}'),
    ("a148", '\u{2788}'),
    ("a149", '\u{2789}'),
    ("a15", '\u{270E}'),
    ("a150", '\u{278A}'),
    ("a151", '\u{278B}'),
    ("a152", '\u{278C}'),
    ("a153", '\u{278D}'),
    ("a154", '\u{278E}'),
    ("a155", '\u{278F}'),
    ("a156", '\u{2790}'),
    ("a157", '\u{2791}'),
    ("a158", '\u{2792}'),
    ("a159", '\u{2793}'),
    ("a16", '\u{270F}'),
    ("a160", '\u{2794}'),
    ("a161", '\u{2192}'),
    ("a162", '\u{27A3}'),
    ("a163", '\u{2194}'),
    ("a164", '\u{2195}'),
    ("a165", '\u{2799}'),
    ("a166", '\u{279B}'),
    ("a167", '\u{279C}'),
    ("a168", '\u{279D}'),
    ("a169", '\u{279E}'),
    ("a17", '\u{2711}'),
    ("a170", '\u{279F}'),
    ("a171", '\u{27A0}'),
    ("a172", '\u{27A1}'),
    ("a173", '\u{27A2}'),
    ("a174", '\u{27A4}'),
    ("a175", '\u{27A5}'),
    ("a176", '\u{27A6}'),
    ("a177", '\u{27A7}'),
    ("a178", '\u{27A8}'),
    ("a179", '\u{27A9}'),
    ("a18", '\u{2712}'),
    ("a180", '\u{27AB}'),
    ("a181", '\u{27AD}'),
    ("a182", '\u{27AF}'),
    ("a183", '\u{27B2}'),
    ("a184", '\u{27B3}'),
    ("a185", '\u{27B5}'),
    ("a186", '\u{27B8}'),
    ("a187", '\u{27BA}'),
    ("a188", '\u{27BB}'),
    ("a189", '\u{27BC}'),
    ("a19", '\u{2713}'),
    ("a190", '\u{27BD}'),
    ("a191", '\u{27BE}'),
    ("a192", '\u{279A}'),
    ("a193", '\u{27AA}'),
    ("a194", '\u{27B6}'),
    ("a195", '\u{27B9}'),
    ("a196", '\u{2798}'),
    ("a197", '\u{27B4}'),
    ("a198", '\u{27B7}'),
    ("a199", '\u{27AC}'),
    ("a2", '\u{2702}'),
    ("a20", '\u{2714}'),
    ("a200", '\u{27AE}'),
    ("a201", '\u{27B1}'),
    ("a202", '\u{2703}'),
    ("a203", '\u{2750}'),
    ("a204", '\u{2752}'),
    ("a21", '\u{2715}'),
    ("a22", '\u{2716}'),
    ("a23", '\u{2717}'),
    ("a24", '\u{2718}'),
    ("a25", '\u{2719}'),
    ("a26", '\u{271A}'),
    ("a27", '\u{271B}'),
    ("a28", '\u{271C}'),
    ("a29", '\u{2722}'),
    ("a3", '\u{2704}'),
    ("a30", '\u{2723}'),
    ("a31", '\u{2724}'),
    ("a32", '\u{2725}'),
    ("a33", '\u{2726}'),
    ("a34", '\u{2727}'),
    ("a35", '\u{2605}'),
    ("a36", '\u{2729}'),
    ("a37", '\u{272A}'),
    ("a38", '\u{272B}'),
    ("a39", '\u{272C}'),
    ("a4", '\u{260E}'),
    ("a40", '\u{272D}'),
    ("a41", '\u{272E}'),
    ("a42", '\u{272F}'),
    ("a43", '\u{2730}'),
    ("a44", '\u{2731}'),
    ("a45", '\u{2732}'),
    ("a46", '\u{2733}'),
    ("a47", '\u{2734}'),
    ("a48", '\u{2735}'),
    ("a49", '\u{2736}'),
    ("a5", '\u{2706}'),
    ("a50", '\u{2737}'),
    ("a51", '\u{2738}'),
    ("a52", '\u{2739}'),
    ("a53", '\u{273A}'),
    ("a54", '\u{273B}'),
    ("a55", '\u{273C}'),
    ("a56", '\u{273D}'),
    ("a57", '\u{273E}'),
    ("a58", '\u{273F}'),
    ("a59", '\u{2740}'),
    ("a6", '\u{271D}'),
    ("a60", '\u{2741}'),
    ("a61", '\u{2742}'),
    ("a62", '\u{2743}'),
    ("a63", '\u{2744}'),
    ("a64", '\u{2745}'),
    ("a65", '\u{2746}'),
    ("a66", '\u{2747}'),
    ("a67", '\u{2748}'),
    ("a68", '\u{2749}'),
    ("a69", '\u{274A}'),
    ("a7", '\u{271E}'),
    ("a70", '\u{274B}'),
    ("a71", '\u{25CF}'),
    ("a72", '\u{274D}'),
    ("a73", '\u{25A0}'),
    ("a74", '\u{274F}'),
    ("a75", '\u{2751}'),
    ("a76", '\u{25B2}'),
    ("a77", '\u{25BC}'),
    ("a78", '\u{25C6}'),
    ("a79", '\u{2756}'),
    ("a8", '\u{271F}'),
    ("a81", '\u{25D7}'),
    ("a82", '\u{2758}'),
    ("a83", '\u{2759}'),
    ("a84", '\u{275A}'),
    ("a9", '\u{2720}'),
    ("a97", '\u{275B}'),
    ("a98", '\u{275C}'),
    ("a99", '\u{275D}'),
    ("aacute", '\u{00E1}'),
    ("acircumflex", '\u{00E2}'),
    ("acute", '\u{00B4}'),
    ("adieresis", '\u{00E4}'),
    ("ae", '\u{00E6}'),
    ("agrave", '\u{00E0}'),
    ("aleph", '\u{2135}'),
    ("alpha", '\u{03B1}'),
    ("ampersand", '\u{0026}'),
    ("ampersandsmall", '\u{F726}'),
    ("angle", '\u{2220}'),
    ("angleleft", '\u{2329}'),
    ("angleright", '\u{232A}'),
    ("approxequal", '\u{2248}'),
    ("aring", '\u{00E5}'),
    ("arrowboth", '\u{2194}'),
    ("arrowdblboth", '\u{21D4}'),
    ("arrowdbldown", '\u{21D3}'),
    ("arrowdblleft", '\u{21D0}'),
    ("arrowdblright", '\u{21D2}'),
    ("arrowdblup", '\u{21D1}'),
    ("arrowdown", '\u{2193}'),
    ("arrowleft", '\u{2190}'),
    ("arrowright", '\u{2192}'),
    ("arrowup", '\u{2191}'),
    ("asciicircum", '\u{005E}'),
    ("asciitilde", '\u{007E}'),
    ("asterisk", '\u{002A}'),
    ("asteriskmath", '\u{2217}'),
    ("at", '\u{0040}'),
    ("atilde", '\u{00E3}'),
    ("b", '\u{0062}'),
    ("backslash", '\u{005C}'),
    ("bar", '\u{007C}'),
    ("beta", '\u{03B2}'),
    ("braceleft", '\u{007B}'),
    ("braceright", '\u{007D}'),
    ("bracketleft", '\u{005B}'),
    ("bracketright", '\u{005D}'),
    ("breve", '\u{02D8}'),
    ("brokenbar", '\u{00A6}'),
    ("bullet", '\u{2022}'),
    ("c", '\u{0063}'),
    ("caron", '\u{02C7}'),
    ("carriagereturn", '\u{21B5}'),
    ("ccedilla", '\u{00E7}'),
    ("cedilla", '\u{00B8}'),
    ("cent", '\u{00A2}'),
    ("centinferior", '\u{F6E5}'),
    ("centoldstyle", '\u{F7A2}'),
    ("chi", '\u{03C7}'),
    ("circlemultiply", '\u{2297}'),
    ("circleplus", '\u{2295}'),
    ("circumflex", '\u{02C6}'),
    ("club", '\u{2663}'),
    ("colon", '\u{003A}'),
    ("colonmonetary", '\u{20A1}'),
    ("comma", '\u{002C}'),
    ("commainferior", '\u{F6E2}'),
    ("congruent", '\u{2245}'),
    ("copyright", '\u{00A9}'),
    ("currency", '\u{00A4}'),
    ("d", '\u{0064}'),
    ("dagger", '\u{2020}'),
    ("daggerdbl", '\u{2021}'),
    ("degree", '\u{00B0}'),
    ("delta", '\u{03B4}'),
    ("diamond", '\u{2666}'),
    ("dieresis", '\u{00A8}'),
    ("divide", '\u{00F7}'),
    ("dollar", '\u{0024}'),
    ("dollaroldstyle", '\u{F724}'),
    ("dollarsuperior", '\u{F6DC}'),
    ("dotaccent", '\u{02D9}'),
    ("dotlessi", '\u{0131}'),
    ("dotmath", '\u{22C5}'),
    ("e", '\u{0065}'),
    ("eacute", '\u{00E9}'),
    ("ecircumflex", '\u{00EA}'),
    ("edieresis", '\u{00EB}'),
    ("egrave", '\u{00E8}'),
    ("eight", '\u{0038}'),
    ("eightinferior", '\u{2088}'),
    ("eightoldstyle", '\u{F738}'),
    ("eightsuperior", '\u{2078}'),
    ("element", '\u{2208}'),
    ("ellipsis", '\u{2026}'),
    ("emdash", '\u{2014}'),
    ("emptyset", '\u{2205}'),
    ("endash", '\u{2013}'),
    ("epsilon", '\u{03B5}'),
    ("equal", '\u{003D}'),
    ("equivalence", '\u{2261}'),
    ("eta", '\u{03B7}'),
    ("eth", '\u{00F0}'),
    ("exclam", '\u{0021}'),
    ("exclamdown", '\u{00A1}'),
    ("exclamdownsmall", '\u{F6E4}'),
    ("exclamsmall", '\u{F721}'),
    ("existential", '\u{2203}'),
    ("f", '\u{0066}'),
    ("ff", '\u{F6F4}'),
    ("ffi", '\u{F6F7}'),
    ("ffl", '\u{F6F8}'),
    ("fi", '\u{FB01}'),
    ("figuredash", '\u{F6EC}'),
    ("five", '\u{0035}'),
    ("fiveeighths", '\u{215D}'),
    ("fiveinferior", '\u{2085}'),
    ("fiveoldstyle", '\u{F735}'),
    ("fivesuperior", '\u{2075}'),
    ("fl", '\u{FB02}'),
    ("florin", '\u{0192}'),
    ("four", '\u{0034}'),
    ("fourinferior", '\u{2084}'),
    ("fouroldstyle", '\u{F734}'),
    ("foursuperior", '\u{F6F3}'),
    ("fraction", '\u{2044}'),
    ("fraction1", '\u{215F}'),
    ("g", '\u{0067}'),
    ("gamma", '\u{03B3}'),
    ("germandbls", '\u{00DF}'),
    ("gradient", '\u{2207}'),
    ("grave", '\u{0060}'),
    ("greater", '\u{003E}'),
    ("greaterequal", '\u{2265}'),
    ("guillemotleft", '\u{00AB}'),
    ("guillemotright", '\u{00BB}'),
    ("guilsinglleft", '\u{2039}'),
    ("guilsinglright", '\u{203A}'),
    ("h", '\u{0068}'),
    ("habornarrow", '\u{F6FA}'),
    ("habornarrowi", '\u{F6ED}'),
    ("heart", '\u{2665}'),
    ("hungarumlaut", '\u{02DD}'),
    ("hyphen", '\u{002D}'),
    ("i", '\u{0069}'),
    ("iacute", '\u{00ED}'),
    ("icircumflex", '\u{00EE}'),
    ("idieresis", '\u{00EF}'),
    ("igrave", '\u{00EC}'),
    ("infinity", '\u{221E}'),
    ("integral", '\u{222B}'),
    ("integralbt", '\u{2321}'),
    ("integraltp", '\u{2320}'),
    ("intersection", '\u{2229}'),
    ("iota", '\u{03B9}'),
    ("j", '\u{006A}'),
    ("k", '\u{006B}'),
    ("kappa", '\u{03BA}'),
    ("l", '\u{006C}'),
    ("lambda", '\u{03BB}'),
    ("less", '\u{003C}'),
    ("lessequal", '\u{2264}'),
    ("logicaland", '\u{2227}'),
    ("logicalnot", '\u{00AC}'),
    ("logicalor", '\u{2228}'),
    ("lozenge", '\u{25CA}'),
    ("lslash", '\u{0142}'),
    ("m", '\u{006D}'),
    ("macron", '\u{00AF}'),
    ("minus", '\u{2212}'),
    ("minute", '\u{2032}'),
    ("mu", '\u{03BC}'),
    ("multiply", '\u{00D7}'),
    ("n", '\u{006E}'),
    ("nine", '\u{0039}'),
    ("nineinferior", '\u{2089}'),
    ("nineoldstyle", '\u{F739}'),
    ("ninesuperior", '\u{2079}'),
    ("non", '\u{00A0}'),
    ("notelement", '\u{2209}'),
    ("notequal", '\u{2260}'),
    ("notsubset", '\u{2284}'),
    ("ntilde", '\u{00F1}'),
    ("nu", '\u{03BD}'),
    ("numbersign", '\u{0023}'),
    ("o", '\u{006F}'),
    ("oacute", '\u{00F3}'),
    ("ocircumflex", '\u{00F4}'),
    ("odieresis", '\u{00F6}'),
    ("oe", '\u{0153}'),
    ("ogonek", '\u{02DB}'),
    ("ograve", '\u{00F2}'),
    ("omega", '\u{03C9}'),
    ("omega1", '\u{03D6}'),
    ("omicron", '\u{03BF}'),
    ("one", '\u{0031}'),
    ("onedotenleader", '\u{2024}'),
    ("oneeighth", '\u{215B}'),
    ("onefitted", '\u{F6DC}'),
    ("onehalf", '\u{00BD}'),
    ("oneinferior", '\u{2081}'),
    ("oneoldstyle", '\u{F731}'),
    ("onequarter", '\u{00BC}'),
    ("onesuperior", '\u{00B9}'),
    ("onethird", '\u{2153}'),
    ("ordfeminine", '\u{00AA}'),
    ("ordmasculine", '\u{00BA}'),
    ("oslash", '\u{00F8}'),
    ("otilde", '\u{00F5}'),
    ("p", '\u{0070}'),
    ("paragraph", '\u{00B6}'),
    ("parenleft", '\u{0028}'),
    ("parenleftinferior", '\u{F7E6}'),
    ("parenleftsuperior", '\u{207D}'),
    ("parenright", '\u{0029}'),
    ("parenrightinferior", '\u{F7E8}'),
    ("parenrightsuperior", '\u{207E}'),
    ("partialdiff", '\u{2202}'),
    ("percent", '\u{0025}'),
    ("period", '\u{002E}'),
    ("periodcentered", '\u{00B7}'),
    ("perpendicular", '\u{22A5}'),
    ("perthousand", '\u{2030}'),
    ("phi", '\u{03C6}'),
    ("phi1", '\u{03D5}'),
    ("pi", '\u{03C0}'),
    ("plus", '\u{002B}'),
    ("plusminus", '\u{00B1}'),
    ("product", '\u{220F}'),
    ("propersubset", '\u{2282}'),
    ("propersuperset", '\u{2283}'),
    ("proportional", '\u{221D}'),
    ("psi", '\u{03C8}'),
    ("q", '\u{0071}'),
    ("question", '\u{003F}'),
    ("questiondown", '\u{00BF}'),
    ("questionsmall", '\u{F73F}'),
    ("quotedbl", '\u{0022}'),
    ("quotedblbase", '\u{201E}'),
    ("quotedblleft", '\u{201C}'),
    ("quotedblright", '\u{201D}'),
    ("quoteleft", '\u{2018}'),
    ("quoteright", '\u{2019}'),
    ("quotesinglbase", '\u{201A}'),
    ("quotesingle", '\u{0027}'),
    ("r", '\u{0072}'),
    ("radical", '\u{221A}'),
    ("reflexsubset", '\u{2286}'),
    ("reflexsuperset", '\u{2287}'),
    ("registered", '\u{00AE}'),
    ("rho", '\u{03C1}'),
    ("ring", '\u{02DA}'),
    ("rupiah", '\u{F6DD}'),
    ("s", '\u{0073}'),
    ("scaron", '\u{0161}'),
    ("second", '\u{2033}'),
    ("section", '\u{00A7}'),
    ("semicolon", '\u{003B}'),
    ("seven", '\u{0037}'),
    ("seveneighths", '\u{215E}'),
    ("seveninferior", '\u{2087}'),
    ("sevenoldstyle", '\u{F737}'),
    ("sevensuperior", '\u{2077}'),
    ("sigma", '\u{03C3}'),
    ("sigma1", '\u{03C2}'),
    ("similar", '\u{223C}'),
    ("six", '\u{0036}'),
    ("sixinferior", '\u{2086}'),
    ("sixoldstyle", '\u{F736}'),
    ("sixsuperior", '\u{2076}'),
    ("slash", '\u{002F}'),
    ("space", '\u{0020}'),
    ("spacehackcyrillic", '\u{F6EE}'),
    ("spade", '\u{2660}'),
    ("sterling", '\u{00A3}'),
    ("suchthat", '\u{220B}'),
    ("summation", '\u{2211}'),
    ("t", '\u{0074}'),
    ("tau", '\u{03C4}'),
    ("therefore", '\u{2234}'),
    ("theta", '\u{03B8}'),
    ("theta1", '\u{03D1}'),
    ("thorn", '\u{00FE}'),
    ("three", '\u{0033}'),
    ("threeeighths", '\u{215C}'),
    ("threeinferior", '\u{2083}'),
    ("threeoldstyle", '\u{F733}'),
    ("threequarters", '\u{00BE}'),
    ("threesuperior", '\u{00B3}'),
    ("tilde", '\u{02DC}'),
    ("trademark", '\u{2122}'),
    ("two", '\u{0032}'),
    ("twodotenleader", '\u{2025}'),
    ("twoinferior", '\u{2082}'),
    ("twooldstyle", '\u{F732}'),
    ("twosuperior", '\u{00B2}'),
    ("twothirds", '\u{2154}'),
    ("u", '\u{0075}'),
    ("uacute", '\u{00FA}'),
    ("ucircumflex", '\u{00FB}'),
    ("udieresis", '\u{00FC}'),
    ("ugrave", '\u{00F9}'),
    ("underscore", '\u{005F}'),
    ("union", '\u{222A}'),
    ("universal", '\u{2200}'),
    ("upsilon", '\u{03C5}'),
    ("v", '\u{0076}'),
    ("w", '\u{0077}'),
    ("weierstrass", '\u{2118}'),
    ("x", '\u{0078}'),
    ("xi", '\u{03BE}'),
    ("y", '\u{0079}'),
    ("yacute", '\u{00FD}'),
    ("ydieresis", '\u{00FF}'),
    ("yen", '\u{00A5}'),
    ("z", '\u{007A}'),
    ("zcaron", '\u{017E}'),
    ("zero", '\u{0030}'),
    ("zeroinferior", '\u{2080}'),
    ("zerooldstyle", '\u{F730}'),
    ("zerosuperior", '\u{2070}'),
    ("zeta", '\u{03B6}'),
];
