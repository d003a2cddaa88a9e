// Porter Stemmer
// Classic Porter (1980) suffix stripping for lowercase English words

/// Stem a single word. Words of two letters or fewer, and words containing
/// anything other than lowercase ASCII letters, are returned lowercased but
/// otherwise unchanged.
pub fn stem(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.len() <= 2 || !lower.bytes().all(|c| c.is_ascii_lowercase()) {
        return lower;
    }

    let mut s = Stemmer {
        b: lower.into_bytes(),
        j: 0,
    };
    s.step1ab();
    if s.k() > 0 {
        s.step1c();
        s.step2();
        s.step3();
        s.step4();
        s.step5();
    }

    // only ASCII bytes were ever written
    String::from_utf8_lossy(&s.b).into_owned()
}

struct Stemmer {
    b: Vec<u8>,
    j: isize,
}

impl Stemmer {
    fn k(&self) -> isize {
        self.b.len() as isize - 1
    }

    fn at(&self, i: isize) -> u8 {
        if i < 0 {
            0
        } else {
            self.b[i as usize]
        }
    }

    fn truncate_to(&mut self, last: isize) {
        self.b.truncate((last + 1).max(0) as usize);
    }

    fn cons(&self, i: isize) -> bool {
        match self.at(i) {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in b[0..=j].
    fn m(&self) -> usize {
        let mut n = 0;
        let mut i = 0;
        loop {
            if i > self.j {
                return n;
            }
            if !self.cons(i) {
                break;
            }
            i += 1;
        }
        i += 1;
        loop {
            loop {
                if i > self.j {
                    return n;
                }
                if self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
            n += 1;
            loop {
                if i > self.j {
                    return n;
                }
                if !self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..=self.j).any(|i| !self.cons(i))
    }

    fn double_consonant(&self, i: isize) -> bool {
        i >= 1 && self.at(i) == self.at(i - 1) && self.cons(i)
    }

    /// consonant-vowel-consonant ending at i, where the last consonant is not w, x or y
    fn cvc(&self, i: isize) -> bool {
        if i < 2 || !self.cons(i) || self.cons(i - 1) || !self.cons(i - 2) {
            return false;
        }
        !matches!(self.at(i), b'w' | b'x' | b'y')
    }

    fn ends(&mut self, suffix: &str) -> bool {
        let suffix = suffix.as_bytes();
        let len = suffix.len() as isize;
        let k = self.k();
        if len > k + 1 {
            return false;
        }
        if &self.b[(k + 1 - len) as usize..] != suffix {
            return false;
        }
        self.j = k - len;
        true
    }

    fn set_to(&mut self, replacement: &str) {
        self.truncate_to(self.j);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    fn replace_if_measured(&mut self, replacement: &str) {
        if self.m() > 0 {
            self.set_to(replacement);
        }
    }

    /// Plurals and -ed / -ing.
    fn step1ab(&mut self) {
        if self.at(self.k()) == b's' {
            if self.ends("sses") {
                self.truncate_to(self.k() - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.at(self.k() - 1) != b's' {
                self.truncate_to(self.k() - 1);
            }
        }

        if self.ends("eed") {
            if self.m() > 0 {
                self.truncate_to(self.k() - 1);
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.truncate_to(self.j);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.k()) {
                if !matches!(self.at(self.k()), b'l' | b's' | b'z') {
                    self.truncate_to(self.k() - 1);
                }
            } else {
                self.j = self.k();
                if self.m() == 1 && self.cvc(self.k()) {
                    self.set_to("e");
                }
            }
        }
    }

    /// Terminal y to i when there is another vowel in the stem.
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let k = self.k() as usize;
            self.b[k] = b'i';
        }
    }

    fn replace_first(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    /// Double suffixes to single ones.
    fn step2(&mut self) {
        let rules: &[(&str, &str)] = match self.at(self.k() - 1) {
            b'a' => &[("ational", "ate"), ("tional", "tion")],
            b'c' => &[("enci", "ence"), ("anci", "ance")],
            b'e' => &[("izer", "ize")],
            b'l' => &[
                ("bli", "ble"),
                ("alli", "al"),
                ("entli", "ent"),
                ("eli", "e"),
                ("ousli", "ous"),
            ],
            b'o' => &[("ization", "ize"), ("ation", "ate"), ("ator", "ate")],
            b's' => &[
                ("alism", "al"),
                ("iveness", "ive"),
                ("fulness", "ful"),
                ("ousness", "ous"),
            ],
            b't' => &[("aliti", "al"), ("iviti", "ive"), ("biliti", "ble")],
            b'g' => &[("logi", "log")],
            _ => &[],
        };
        self.replace_first(rules);
    }

    /// -ic-, -full, -ness etc.
    fn step3(&mut self) {
        let rules: &[(&str, &str)] = match self.at(self.k()) {
            b'e' => &[("icate", "ic"), ("ative", ""), ("alize", "al")],
            b'i' => &[("iciti", "ic")],
            b'l' => &[("ical", "ic"), ("ful", "")],
            b's' => &[("ness", "")],
            _ => &[],
        };
        self.replace_first(rules);
    }

    /// Strip -ant, -ence etc. in context <c>vcvc<v>.
    fn step4(&mut self) {
        let matched = match self.at(self.k() - 1) {
            b'a' => self.ends("al"),
            b'c' => self.ends("ance") || self.ends("ence"),
            b'e' => self.ends("er"),
            b'i' => self.ends("ic"),
            b'l' => self.ends("able") || self.ends("ible"),
            b'n' => self.ends("ant") || self.ends("ement") || self.ends("ment") || self.ends("ent"),
            b'o' => {
                (self.ends("ion") && matches!(self.at(self.j), b's' | b't')) || self.ends("ou")
            }
            b's' => self.ends("ism"),
            b't' => self.ends("ate") || self.ends("iti"),
            b'u' => self.ends("ous"),
            b'v' => self.ends("ive"),
            b'z' => self.ends("ize"),
            _ => false,
        };
        if matched && self.m() > 1 {
            self.truncate_to(self.j);
        }
    }

    /// Final -e and -ll.
    /// The measure is taken once over the whole word, before any -e is dropped.
    fn step5(&mut self) {
        self.j = self.k();
        let m = self.m();
        if self.at(self.k()) == b'e' && (m > 1 || (m == 1 && !self.cvc(self.k() - 1))) {
            self.truncate_to(self.k() - 1);
        }
        if self.at(self.k()) == b'l' && self.double_consonant(self.k()) && m > 1 {
            self.truncate_to(self.k() - 1);
        }
    }
}
