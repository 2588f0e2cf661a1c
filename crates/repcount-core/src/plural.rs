/// Pick the Ukrainian noun form agreeing with `n`.
pub fn plural_uk<'a>(n: u64, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    let last = n % 10;
    let last_two = n % 100;
    if last == 1 && last_two != 11 {
        one
    } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
        few
    } else {
        many
    }
}

pub fn reps_word(n: u64) -> &'static str {
    plural_uk(n, "повтор", "повтори", "повторів")
}

pub fn approaches_word(n: u64) -> &'static str {
    plural_uk(n, "підхід", "підходи", "підходів")
}
