//! Built-in license texts
//!
//! `{year}` and `{holder}` are substituted when the file is written.

/// A license that `project:license` can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseTemplate {
    pub identifier: &'static str,
    pub name: &'static str,
    pub text: &'static str,
}

impl LicenseTemplate {
    /// Template text with the year and copyright holder filled in
    pub fn render(&self, year: i32, holder: &str) -> String {
        self.text
            .replace("{year}", &year.to_string())
            .replace("{holder}", holder)
    }
}

/// Look up a template by its identifier, case-insensitively
pub fn find(identifier: &str) -> Option<&'static LicenseTemplate> {
    LICENSES
        .iter()
        .find(|l| l.identifier.eq_ignore_ascii_case(identifier.trim()))
}

pub const LICENSES: &[LicenseTemplate] = &[
    LicenseTemplate {
        identifier: "mit",
        name: "MIT License",
        text: MIT,
    },
    LicenseTemplate {
        identifier: "apache",
        name: "Apache License 2.0",
        text: APACHE_2_0,
    },
    LicenseTemplate {
        identifier: "gpl",
        name: "GNU General Public License v3.0",
        text: GPL_3_0,
    },
    LicenseTemplate {
        identifier: "isc",
        name: "ISC License",
        text: ISC,
    },
    LicenseTemplate {
        identifier: "bsd-3-clause",
        name: "BSD 3-Clause License",
        text: BSD_3_CLAUSE,
    },
    LicenseTemplate {
        identifier: "unlicense",
        name: "The Unlicense",
        text: UNLICENSE,
    },
];

const APACHE_2_0: &str = include_str!("licenses/apache-2.0.txt");

const GPL_3_0: &str = include_str!("licenses/gpl-3.0.txt");

const MIT: &str = r#"MIT License

Copyright (c) {year} {holder}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
"#;

const ISC: &str = r#"ISC License

Copyright (c) {year} {holder}

Permission to use, copy, modify, and/or distribute this software for any
purpose with or without fee is hereby granted, provided that the above
copyright notice and this permission notice appear in all copies.

THE SOFTWARE IS PROVIDED "AS IS" AND THE AUTHOR DISCLAIMS ALL WARRANTIES
WITH REGARD TO THIS SOFTWARE INCLUDING ALL IMPLIED WARRANTIES OF
MERCHANTABILITY AND FITNESS. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR
ANY SPECIAL, DIRECT, INDIRECT, OR CONSEQUENTIAL DAMAGES OR ANY DAMAGES
WHATSOEVER RESULTING FROM LOSS OF USE, DATA OR PROFITS, WHETHER IN AN
ACTION OF CONTRACT, NEGLIGENCE OR OTHER TORTIOUS ACTION, ARISING OUT OF
OR IN CONNECTION WITH THE USE OR PERFORMANCE OF THIS SOFTWARE.
"#;

const BSD_3_CLAUSE: &str = r#"BSD 3-Clause License

Copyright (c) {year}, {holder}

Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions are met:

1. Redistributions of source code must retain the above copyright notice, this
   list of conditions and the following disclaimer.

2. Redistributions in binary form must reproduce the above copyright notice,
   this list of conditions and the following disclaimer in the documentation
   and/or other materials provided with the distribution.

3. Neither the name of the copyright holder nor the names of its
   contributors may be used to endorse or promote products derived from
   this software without specific prior written permission.

THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
"#;

const UNLICENSE: &str = r#"This is free and unencumbered software released into the public domain.

Anyone is free to copy, modify, publish, use, compile, sell, or
distribute this software, either in source code form or as a compiled
binary, for any purpose, commercial or non-commercial, and by any
means.

In jurisdictions that recognize copyright laws, the author or authors
of this software dedicate any and all copyright interest in the
software to the public domain. We make this dedication for the benefit
of the public at large and to the detriment of our heirs and
successors. We intend this dedication to be an overt act of
relinquishment in perpetuity of all present and future rights to this
software under copyright law.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
IN NO EVENT SHALL THE AUTHORS BE LIABLE FOR ANY CLAIM, DAMAGES OR
OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE,
ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR
OTHER DEALINGS IN THE SOFTWARE.

For more information, please refer to <https://unlicense.org>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("MIT").map(|l| l.name), Some("MIT License"));
        assert_eq!(find(" bsd-3-clause ").map(|l| l.identifier), Some("bsd-3-clause"));
        assert_eq!(find("GPL").map(|l| l.identifier), Some("gpl"));
        assert!(find("wtfpl").is_none());
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let text = find("mit").unwrap().render(2024, "Ada Lovelace");
        assert!(text.contains("Copyright (c) 2024 Ada Lovelace"));
        assert!(!text.contains('{'));

        let unlicense = find("unlicense").unwrap().render(2024, "Ada");
        assert!(!unlicense.contains("Ada"));
    }
}
