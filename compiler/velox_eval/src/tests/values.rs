use pretty_assertions::assert_eq;

use super::{output_of, result_of};

#[test]
fn arithmetic_precedence() {
    assert_eq!(result_of("return 2 + 3 * 4;").to_integer().unwrap(), 14);
    assert_eq!(result_of("return (2 + 3) * 4;").to_integer().unwrap(), 20);
    assert_eq!(result_of("return 10 - 4 - 3;").to_integer().unwrap(), 3);
}

#[test]
fn number_kinds() {
    let out = output_of(
        "print(1 + 2.5);
         print(7 / 2);
         print(7 % 3);
         print(-7 / 2);
         print(7.0 / 2);
         print(0x1f);",
    );
    assert_eq!(out, "3.5\n3\n1\n-3\n3.5\n31\n");
}

#[test]
fn strings_concatenate_and_index() {
    let out = output_of(
        r#"s = "ab";
           s += "cd";
           print(s);
           print(length(s));
           print(s[1]);
           print("n=" + 4 + ", v=" + <1, 2>);"#,
    );
    assert_eq!(out, "abcd\n4\nb\nn=4, v=<1.0,2.0>\n");
}

#[test]
fn colors() {
    let out = output_of(
        "c = |255, 128, 0|;
         print(c);
         print(c.g);
         p = |0x102030|;
         print(p.r);
         print(c + |10, 10, 10, 0|);
         print(|300, -4, 7, 1|);",
    );
    assert_eq!(
        out,
        "|255,128,0,255|\n128\n16\n|255,138,10,255|\n|255,0,7,1|\n"
    );
}

#[test]
fn vectors() {
    let out = output_of(
        "v = <1, 2> * 2;
         print(v);
         print(v.x + v.y);
         print(-v);
         print(<1, 1> + <0.5, 2>);",
    );
    assert_eq!(out, "<2.0,4.0>\n6.0\n<-2.0,-4.0>\n<1.5,3.0>\n");
}

#[test]
fn lists() {
    let out = output_of(
        "l = [1, 2];
         append(l, 3);
         l[0] = 10;
         l[1] += 5;
         print(l);
         print(length(l));
         print(typeOf(l));
         print([]);",
    );
    assert_eq!(out, "[10, 7, 3]\n3\nlist\n[]\n");
}

#[test]
fn list_literal_copies_element_state() {
    let out = output_of(
        "a = 1;
         l = [a, a];
         l[0] = 5;
         print(a);
         print(l);",
    );
    assert_eq!(out, "1\n[5, 1]\n");
}

#[test]
fn logical_operators_short_circuit() {
    let out = output_of(
        "calls = 0;
         function hit() { global calls; calls++; return true; }
         print(true && false || true);
         print(0 || 2);
         print(false && hit());
         print(true || hit());
         print(calls);
         print(!0);",
    );
    assert_eq!(out, "true\ntrue\nfalse\ntrue\n0\ntrue\n");
}

#[test]
fn relational_operators() {
    let out = output_of(
        r#"print(1 < 2);
           print(2.5 >= 2);
           print("a" == "a");
           print("abc" < "abd");
           print(undefined == undefined);
           print(|1,2,3| == |1,2,3|);
           print(<1,2> != <1,2>);
           print(true != false);"#,
    );
    assert_eq!(out, "true\ntrue\ntrue\ntrue\ntrue\ntrue\nfalse\ntrue\n");
}

#[test]
fn increment_and_decrement() {
    let out = output_of(
        "i = 5;
         j = i++;
         k = ++i;
         r = 1.5;
         r--;
         print(i);
         print(j);
         print(k);
         print(r);",
    );
    assert_eq!(out, "7\n5\n7\n0.5\n");
}

#[test]
fn compound_assignment() {
    let out = output_of(
        "x = 10;
         x -= 3;
         x *= 2;
         x /= 7;
         x %= 3;
         print(x);",
    );
    assert_eq!(out, "2\n");
}

#[test]
fn assignment_copies_values() {
    let out = output_of(
        "a = 1;
         b = a;
         b = 2;
         print(a);
         var c = a;
         c++;
         print(a);",
    );
    assert_eq!(out, "1\n1\n");
}

#[test]
fn kind_names() {
    let out = output_of(
        r#"print(typeOf(1));
           print(typeOf(1.5));
           print(typeOf("s"));
           print(typeOf(true));
           print(typeOf(undefined));
           print(typeOf(|1,2,3|));
           print(typeOf(<1,2>));
           print(typeOf(print));"#,
    );
    assert_eq!(
        out,
        "integer\nreal\nstring\nboolean\nundefined\ncolor\nvector\nfunction\n"
    );
}
